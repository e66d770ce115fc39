//! Input validation limits for record construction and queries

/// Default hop bound for downstream queries
pub const DEFAULT_DEPTH: u32 = 2;

/// Maximum depth accepted for downstream queries (50)
pub const MAX_QUERY_DEPTH: u32 = 50;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    EmptyKey { prefix: &'static str },
    QueryDepthTooLarge { depth: u32, max: u32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field '{}' cannot be empty", field),
            Self::EmptyKey { prefix } => {
                write!(f, "Identifier after prefix '{}' cannot be empty", prefix)
            }
            Self::QueryDepthTooLarge { depth, max } => {
                write!(f, "Query depth too large: {} (max {})", depth, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate that a required string field is non-empty
pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// Validate query depth
pub fn validate_depth(depth: u32) -> Result<(), ValidationError> {
    if depth > MAX_QUERY_DEPTH {
        return Err(ValidationError::QueryDepthTooLarge {
            depth,
            max: MAX_QUERY_DEPTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("id", "GENE:INS").is_ok());
        assert_eq!(
            validate_required("id", ""),
            Err(ValidationError::EmptyField { field: "id" })
        );
    }

    #[test]
    fn test_validate_depth() {
        assert!(validate_depth(0).is_ok());
        assert!(validate_depth(MAX_QUERY_DEPTH).is_ok());
        assert!(validate_depth(MAX_QUERY_DEPTH + 1).is_err());
    }
}
