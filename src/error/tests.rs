//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod score_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let score_error = ScoreError::from(json_error);

        match score_error {
            ScoreError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
        assert_eq!(
            ScoreError::from(serde_json::from_str::<u8>("x").unwrap_err()).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let score_error = ScoreError::from(io_error);

        match score_error {
            ScoreError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not_a_number".parse::<u64>().unwrap_err();
        let score_error = ScoreError::from(parse_error);

        match score_error {
            ScoreError::InvalidId(_) => (),
            _ => panic!("Expected InvalidId error variant"),
        }
        assert_eq!(
            ScoreError::from("x".parse::<u64>().unwrap_err()).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_database_error_conversion() {
        let db_error = rusqlite::Error::InvalidColumnType(
            0,
            "test_column".to_string(),
            rusqlite::types::Type::Null,
        );
        let score_error = ScoreError::from(db_error);

        match score_error {
            ScoreError::Database(_) => (),
            _ => panic!("Expected Database error variant"),
        }
    }

    #[test]
    fn test_system_time_error_conversion() {
        use std::time::{Duration, SystemTime, UNIX_EPOCH};

        let future_time = SystemTime::now() + Duration::from_secs(100);
        let system_time_error = UNIX_EPOCH.duration_since(future_time).unwrap_err();
        let score_error = ScoreError::from(system_time_error);

        match score_error {
            ScoreError::SystemTime(_) => (),
            _ => panic!("Expected SystemTime error variant"),
        }
    }

    #[test]
    fn test_not_found_error() {
        let error = ScoreError::not_found("Match", 42);

        assert_eq!(error.to_string(), "Match not found: 42");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_invalid_state_error() {
        let error = ScoreError::invalid_state("match is not live");

        let error_string = error.to_string();
        assert!(error_string.contains("Invalid state"));
        assert!(error_string.contains("match is not live"));
        assert_eq!(error.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_validation_error() {
        let error = ScoreError::validation("runs must be between 0 and 6");

        assert!(error.to_string().starts_with("Validation failed"));
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_conflict_error() {
        let error = ScoreError::Conflict {
            match_id: MatchId::new(7),
        };

        assert_eq!(error.to_string(), "Match 7 was modified concurrently");
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_config_error_is_storage_kind() {
        let error = ScoreError::Config {
            message: "Could not determine data directory".to_string(),
        };

        assert!(error.to_string().contains("Could not determine data directory"));
        assert_eq!(error.kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let score_error = ScoreError::from(io_error);

        let error_trait: &dyn std::error::Error = &score_error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(ScoreError::validation("bad input"))
        }

        match test_function().unwrap_err() {
            ScoreError::Validation { message } => assert_eq!(message, "bad input"),
            _ => panic!("Expected Validation error"),
        }
    }
}
