use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A bounded wait on a store call elapsed before the call completed.
    #[error("Timed out after {waited_ms}ms waiting for {operation}")]
    Timeout {
        operation: &'static str,
        waited_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = CoreError::NotFound {
            entity: "Record",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: Record with id 7");
    }

    #[test]
    fn display_timeout() {
        let err = CoreError::Timeout {
            operation: "find_by_id",
            waited_ms: 1000,
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 1000ms waiting for find_by_id"
        );
    }
}
