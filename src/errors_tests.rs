//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::MindMapError;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = MindMapError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_invalid_input_error() {
        let error = MindMapError::InvalidInput("top_n must be positive".to_string());
        assert!(matches!(error, MindMapError::InvalidInput(_)));
        assert_eq!(format!("{error}"), "Invalid input: top_n must be positive");
    }

    #[test]
    fn test_unknown_author_kind_error() {
        let error = MindMapError::UnknownAuthorKind("system".to_string());
        assert!(format!("{error}").contains("system"));
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: MindMapError = io_err.into();
        assert!(matches!(err, MindMapError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_result: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");
        let json_err = parse_result.unwrap_err();
        let err: MindMapError = json_err.into();
        assert!(matches!(err, MindMapError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let parse_result: Result<toml::Value, _> = toml::from_str("key = = value");
        let toml_err = parse_result.unwrap_err();
        let err: MindMapError = toml_err.into();
        assert!(matches!(err, MindMapError::TomlParsing(_)));
        assert!(format!("{err}").starts_with("TOML parsing error"));
    }

    #[test]
    fn test_error_from_sqlx() {
        let err: MindMapError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, MindMapError::Database(_)));
    }

    // ====== Error Debug/Display Tests ======

    #[test]
    fn test_error_debug_format() {
        let error = MindMapError::Custom("Debug test".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("Custom"));
    }
}
