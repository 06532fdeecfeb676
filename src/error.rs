use miette::Diagnostic;
use thiserror::Error;

/// Main error type for retrotile operations
#[derive(Error, Diagnostic, Debug)]
pub enum TileError {
    #[error("IO error: {0}")]
    #[diagnostic(code(retrotile::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(retrotile::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(retrotile::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(retrotile::image))]
    Image {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Resource error: {message}")]
    #[diagnostic(code(retrotile::resource))]
    Resource {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TileError>;
