use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, ListingError>;

/// Listing and application error types.
///
/// Only construction and I/O can fail. Once a listing exists, stale or
/// empty inputs degrade to no-ops instead of surfacing here.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The scroll view has no row to use as a template.
    #[error("Scroll view has no template item to clone")]
    MissingTemplate,

    /// The template row has no measurable height.
    #[error("Template item has zero height")]
    ZeroHeightTemplate,

    /// I/O errors from reading the catalog or config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The item catalog could not be parsed.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl From<serde_json::Error> for ListingError {
    fn from(err: serde_json::Error) -> Self {
        ListingError::InvalidCatalog(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "catalog not found");
        let err: ListingError = io_err.into();
        assert!(matches!(err, ListingError::Io(_)));
        assert!(err.to_string().contains("catalog not found"));
    }

    #[test]
    fn missing_template_display() {
        assert_eq!(
            ListingError::MissingTemplate.to_string(),
            "Scroll view has no template item to clone"
        );
    }

    #[test]
    fn json_error_becomes_invalid_catalog() {
        let json_err = serde_json::from_str::<Vec<String>>("{ nope").unwrap_err();
        let err: ListingError = json_err.into();
        assert!(matches!(err, ListingError::InvalidCatalog(_)));
        assert!(err.to_string().starts_with("Invalid catalog:"));
    }

    #[test]
    fn invalid_path_error_display() {
        let err = ListingError::InvalidPath("/nonexistent".into());
        assert_eq!(err.to_string(), "Invalid path: /nonexistent");
    }
}
