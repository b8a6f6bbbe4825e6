use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Filesystem or archive failure raised while the archive was being built
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Zip(_) | Error::Walk(_))
    }
}

impl<F> From<tempfile::PersistError<F>> for Error {
    fn from(err: tempfile::PersistError<F>) -> Self {
        Error::Io(err.error)
    }
}
