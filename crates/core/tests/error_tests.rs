// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use stock_calculator_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_input() {
        let err = CoreError::invalid_input("quantity", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'quantity': must be greater than zero"
        );
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("initial must be below final".into());
        assert_eq!(err.to_string(), "Validation failed: initial must be below final");
    }

    #[test]
    fn calculation_error() {
        let err = CoreError::CalculationError("new average price is not a finite number".into());
        assert_eq!(
            err.to_string(),
            "Calculation failed: new average price is not a finite number"
        );
    }

    #[test]
    fn record_not_found() {
        let err = CoreError::RecordNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Calculation record not found: abc-123");
    }

    #[test]
    fn invalid_file_format() {
        let err = CoreError::InvalidFileFormat("Stored blob is empty".into());
        assert_eq!(err.to_string(), "Invalid file format: Stored blob is empty");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(7);
        assert_eq!(err.to_string(), "Unsupported store version: 7");
    }

    #[test]
    fn unsupported_version_max() {
        let err = CoreError::UnsupportedVersion(u32::MAX);
        assert_eq!(
            err.to_string(),
            format!("Unsupported store version: {}", u32::MAX)
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad float".into());
        assert_eq!(err.to_string(), "Serialization error: bad float");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("missing field".into());
        assert_eq!(err.to_string(), "Deserialization error: missing field");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("disk full".into());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}

// ── Classification ──────────────────────────────────────────────────

mod classification {
    use super::*;

    #[test]
    fn user_errors() {
        assert!(CoreError::invalid_input("x", "y").is_user_error());
        assert!(CoreError::ValidationError("v".into()).is_user_error());
        assert!(CoreError::CalculationError("c".into()).is_user_error());
    }

    #[test]
    fn system_errors() {
        assert!(!CoreError::Storage("s".into()).is_user_error());
        assert!(!CoreError::UnsupportedVersion(2).is_user_error());
        assert!(!CoreError::RecordNotFound("id".into()).is_user_error());
        assert!(!CoreError::Deserialization("d".into()).is_user_error());
    }

    #[test]
    fn invalid_input_fields() {
        match CoreError::invalid_input(String::from("price"), "bad") {
            CoreError::InvalidInput { field, message } => {
                assert_eq!(field, "price");
                assert_eq!(message, "bad");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Storage(ref m) if m.contains("read-only")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagation() {
        fn read() -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str("[1, 2")?)
        }
        assert!(read().is_err());
    }
}
