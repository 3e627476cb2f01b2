//! Prompt template rendering.
//!
//! Templates use `{{{ name }}}` directives. A directive whose name is a
//! substitution key is replaced by that value; any other directive names a
//! file whose contents are read through the [`FileReader`] port. The rest of
//! the template is rendered by `minijinja`.
//!
//! A template without an `{{{ input }}}` directive is not rendered at all:
//! the result is the template, a blank line, and the input.

use minijinja::Environment;
use std::collections::BTreeMap;

use crate::turn::error::TemplateError;
use crate::turn::ports::FileReader;

/// Substitution key holding the text typed after the command name.
pub const INPUT_KEY: &str = "input";

const DIRECTIVE_OPEN: &str = "{{{";
const DIRECTIVE_CLOSE: &str = "}}}";

/// Renders `template` with `substitutions`, resolving file directives through
/// `files`.
///
/// Output depends only on the template, the substitutions and the file
/// contents. Each distinct file is read once, in order of first appearance.
///
/// # Errors
///
/// Returns [`TemplateError::FileNotFound`] when a referenced file is missing,
/// [`TemplateError::FileRead`] for other read failures and
/// [`TemplateError::Render`] when the template is malformed.
pub async fn render_template<F>(
    template: &str,
    files: &F,
    substitutions: &BTreeMap<String, String>,
) -> Result<String, TemplateError>
where
    F: FileReader + ?Sized,
{
    let segments = parse_segments(template);
    let has_input_placeholder = segments
        .iter()
        .any(|segment| matches!(segment, Segment::Directive(name) if *name == INPUT_KEY));

    if !has_input_placeholder {
        let input = substitutions.get(INPUT_KEY).map_or("", String::as_str);
        return Ok(format!("{template}\n\n{input}"));
    }

    let mut source = String::with_capacity(template.len());
    let mut context: BTreeMap<String, String> = BTreeMap::new();
    let mut file_contents: BTreeMap<&str, String> = BTreeMap::new();

    for segment in &segments {
        match segment {
            Segment::Literal(text) => source.push_str(text),
            Segment::Directive(name) => {
                let value = match substitutions.get(*name) {
                    Some(value) => value.clone(),
                    None => read_once(files, *name, &mut file_contents).await?,
                };
                let slot = format!("slot_{}", context.len());
                source.push_str("{{ ");
                source.push_str(&slot);
                source.push_str(" }}");
                context.insert(slot, value);
            }
        }
    }

    let mut environment = Environment::new();
    environment.set_keep_trailing_newline(true);
    environment
        .render_str(&source, context)
        .map_err(|error| TemplateError::Render {
            reason: error.to_string(),
        })
}

async fn read_once<'t, F>(
    files: &F,
    path: &'t str,
    cache: &mut BTreeMap<&'t str, String>,
) -> Result<String, TemplateError>
where
    F: FileReader + ?Sized,
{
    if let Some(contents) = cache.get(path) {
        return Ok(contents.clone());
    }
    let contents = files.read_file(path).await?;
    cache.insert(path, contents.clone());
    Ok(contents)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'t> {
    Literal(&'t str),
    Directive(&'t str),
}

fn parse_segments(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some((before, after_open)) = rest.split_once(DIRECTIVE_OPEN) {
        let Some((inner, after_close)) = after_open.split_once(DIRECTIVE_CLOSE) else {
            break;
        };
        let name = inner.trim();
        if name.is_empty() {
            break;
        }
        if !before.is_empty() {
            segments.push(Segment::Literal(before));
        }
        segments.push(Segment::Directive(name));
        rest = after_close;
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}
