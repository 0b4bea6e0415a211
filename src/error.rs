use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors (log file, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Network or non-2xx failure on a read (list) request.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Non-2xx failure on a delete/create request. Local state is left
    /// untouched by the caller.
    #[error("Mutation rejected: {0}")]
    Mutation(String),

    /// Malformed server base URL.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("config not found"));
    }

    #[test]
    fn fetch_error_display() {
        let err = AppError::Fetch("HTTP 503 from /api/storage/listfoldertree".into());
        assert_eq!(
            err.to_string(),
            "Fetch failed: HTTP 503 from /api/storage/listfoldertree"
        );
    }

    #[test]
    fn mutation_error_display() {
        let err = AppError::Mutation("HTTP 409 deleting 2024/invoice.pdf".into());
        assert!(err.to_string().starts_with("Mutation rejected:"));
    }

    #[test]
    fn invalid_url_error_display() {
        let err = AppError::InvalidUrl("ftp://storage".into());
        assert_eq!(err.to_string(), "Invalid server URL: ftp://storage");
    }
}
