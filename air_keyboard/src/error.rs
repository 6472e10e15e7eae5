//! Application errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window: {0}")]
    Window(String),

    #[error("cannot read config {}: {source}", .path.display())]
    ConfigIo {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("{0} expects a value")]
    MissingValue(&'static str),

    #[error("unknown argument `{0}`")]
    UnknownArgument(String),

    #[error("keystroke injector: {0}")]
    Injector(String),
}

impl AppError {
    /// Errors caused by the command line rather than the environment.
    pub fn is_usage(&self) -> bool {
        matches!(self, AppError::MissingValue(_) | AppError::UnknownArgument(_))
    }
}

impl From<minifb::Error> for AppError {
    fn from(e: minifb::Error) -> Self {
        AppError::Window(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(AppError::MissingValue("--layout").to_string(), "--layout expects a value");
        assert_eq!(AppError::UnknownArgument("--x".into()).to_string(), "unknown argument `--x`");
    }

    #[test]
    fn usage_errors() {
        assert!(AppError::UnknownArgument("-v".into()).is_usage());
        assert!(!AppError::Window("closed".into()).is_usage());
    }
}
