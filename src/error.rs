use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeloError {
    /// A line of a Felo file that does not fit the grammar of its section,
    /// or that is semantically invalid (e.g. an unknown participant).
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },

    /// A value that could not be interpreted, without positional context.
    #[error("invalid value: {0}")]
    Format(String),

    #[error("bootstrapping did not converge within {cycles} cycles")]
    Convergence { cycles: usize },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("please delete the backup copy {} first", .0.display())]
    BackupExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error)
}

impl FeloError {
    pub fn line(line: usize, message: impl Into<String>) -> Self {
        FeloError::Line {
            line,
            message: message.into()
        }
    }
}

pub type Result<T> = std::result::Result<T, FeloError>;

#[cfg(test)]
mod tests {
    use super::FeloError;

    #[test]
    fn test_line_error_message() {
        let error = FeloError::line(12, "participant \"Bob\" is unknown");

        assert_eq!(error.to_string(), "line 12: participant \"Bob\" is unknown");
    }

    #[test]
    fn test_convergence_error_message() {
        let error = FeloError::Convergence { cycles: 1000 };

        assert_eq!(error.to_string(), "bootstrapping did not converge within 1000 cycles");
    }
}
