//! Record entity model and DTOs.

use idstore_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `ids` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Record {
    pub id: DbId,
    pub uuid: Uuid,
}

/// A record that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub uuid: Uuid,
}

/// Request body for creating or updating a record.
///
/// `uuid` stays a raw string so that missing, empty and malformed values
/// all reach the same validation path.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPayload {
    pub uuid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_as_id_and_uuid() {
        let record = Record {
            id: 5,
            uuid: Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 5, "uuid": "11111111-1111-1111-1111-111111111111" })
        );
    }

    #[test]
    fn payload_without_uuid_deserializes_to_none() {
        let payload: RecordPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.uuid.is_none());
    }
}
