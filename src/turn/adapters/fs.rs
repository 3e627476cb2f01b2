//! Capability-scoped file reader for template includes.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

use crate::turn::ports::file_reader::{FileReadError, FileReader};

/// Reads files relative to a root directory.
///
/// Paths are resolved inside the root; absolute paths and paths that climb
/// out of it are refused and reported as [`FileReadError::Io`].
#[derive(Debug, Clone)]
pub struct CapStdFileReader {
    root: Arc<Dir>,
}

impl CapStdFileReader {
    /// Opens `root` as the include directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised when the directory cannot be opened.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            root: Arc::new(dir),
        }
    }
}

#[async_trait]
impl FileReader for CapStdFileReader {
    async fn read_file(&self, path: &str) -> Result<String, FileReadError> {
        let root = Arc::clone(&self.root);
        let relative = path.to_owned();
        let outcome = tokio::task::spawn_blocking(move || root.read_to_string(relative)).await;

        match outcome {
            Ok(Ok(contents)) => Ok(contents),
            Ok(Err(error)) if error.kind() == io::ErrorKind::NotFound => {
                Err(FileReadError::NotFound(path.to_owned()))
            }
            Ok(Err(error)) => {
                tracing::warn!(path, %error, "failed to read template include");
                Err(FileReadError::Io {
                    path: path.to_owned(),
                    reason: error.to_string(),
                })
            }
            Err(join_error) => Err(FileReadError::Io {
                path: path.to_owned(),
                reason: join_error.to_string(),
            }),
        }
    }
}
