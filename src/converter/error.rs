use std::path::PathBuf;
use thiserror::Error;

use super::TargetFormat;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Please select an image first.")]
    NoFileSelected,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode {path}: {message}")]
    DecodeError { path: PathBuf, message: String },

    #[error("Failed to encode {format}: {message}")]
    EncodeError { format: TargetFormat, message: String },
}

impl ConvertError {
    pub(crate) fn decode(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ConvertError::DecodeError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn encode(format: TargetFormat, err: impl std::fmt::Display) -> Self {
        ConvertError::EncodeError {
            format,
            message: err.to_string(),
        }
    }

    /// Write failures are reported as encode failures: the output never reached disk.
    pub(crate) fn write(format: TargetFormat, path: &std::path::Path, err: std::io::Error) -> Self {
        ConvertError::EncodeError {
            format,
            message: format!("cannot write {}: {}", path.display(), err),
        }
    }

    /// Message shown to the user in the notification window.
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::NoFileSelected => self.to_string(),
            other => format!("An error occurred:\n{}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
