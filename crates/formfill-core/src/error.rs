use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("Invalid value map: {0}")]
    InvalidValueMap(String),

    #[error("Layout extraction failed: {0}")]
    Layout(String),

    #[error("PDF operation failed: {0}")]
    Operation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FormError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FormError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a widget's `/Rect` could not be turned into geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RectError {
    #[error("rectangle is missing")]
    Missing,

    #[error("rectangle has {0} elements, expected 4")]
    WrongLength(usize),

    #[error("rectangle element {0} is not a number")]
    NotNumeric(usize),
}
