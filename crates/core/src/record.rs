//! Validation of client-supplied record payloads.
//!
//! A payload carries a single `uuid` field. It must be present, non-empty,
//! and in the canonical hyphenated RFC 4122 form before anything reaches
//! the store.

use uuid::Uuid;

use crate::error::CoreError;

/// Entity name used in `NotFound` errors and log fields.
pub const RECORD_ENTITY: &str = "Record";

/// Length of the hyphenated form (`8-4-4-4-12`).
const HYPHENATED_LEN: usize = 36;

/// Parse and validate the `uuid` field of a creation/update payload.
pub fn validate_uuid(raw: Option<&str>) -> Result<Uuid, CoreError> {
    let raw = match raw.map(str::trim) {
        None => return Err(CoreError::Validation("uuid is required".to_string())),
        Some("") => return Err(CoreError::Validation("uuid must not be empty".to_string())),
        Some(s) => s,
    };

    // `Uuid::parse_str` also accepts the simple, braced and URN forms.
    if raw.len() != HYPHENATED_LEN {
        return Err(CoreError::Validation(format!(
            "uuid must be in hyphenated form, got '{raw}'"
        )));
    }

    Uuid::parse_str(raw)
        .map_err(|e| CoreError::Validation(format!("uuid '{raw}' is malformed: {e}")))
}

/// Validate every payload uuid of a batch, in order.
///
/// Fails on the first invalid element; the error names its position.
pub fn validate_batch<'a, I>(raws: I) -> Result<Vec<Uuid>, CoreError>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    raws.into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            validate_uuid(raw).map_err(|e| match e {
                CoreError::Validation(msg) => CoreError::Validation(format!("[{idx}]: {msg}")),
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hyphenated_uuid_accepted() {
        let uuid = validate_uuid(Some("11111111-1111-1111-1111-111111111111")).unwrap();
        assert_eq!(uuid.to_string(), "11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn uppercase_uuid_accepted() {
        assert!(validate_uuid(Some("A0EEBC99-9C0B-4EF8-BB6D-6BB9BD380A11")).is_ok());
    }

    #[test]
    fn missing_uuid_rejected() {
        assert_matches!(validate_uuid(None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_uuid_rejected() {
        assert_matches!(validate_uuid(Some("   ")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn simple_form_rejected() {
        let result = validate_uuid(Some("a0eebc999c0b4ef8bb6d6bb9bd380a11"));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("hyphenated"));
    }

    #[test]
    fn garbage_of_right_length_rejected() {
        let result = validate_uuid(Some("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("malformed"));
    }

    #[test]
    fn batch_preserves_order() {
        let ids = validate_batch([
            Some("11111111-1111-1111-1111-111111111111"),
            Some("22222222-2222-2222-2222-222222222222"),
        ])
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1].to_string(), "22222222-2222-2222-2222-222222222222");
    }

    #[test]
    fn batch_reports_failing_index() {
        let result = validate_batch([Some("11111111-1111-1111-1111-111111111111"), None]);
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.starts_with("[1]"));
    }

    #[test]
    fn empty_batch_is_valid() {
        let ids = validate_batch(std::iter::empty::<Option<&str>>()).unwrap();
        assert!(ids.is_empty());
    }
}
