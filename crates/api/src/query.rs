//! Query parameter types for the record endpoints.

use idstore_core::types::DbId;
use serde::de;
use serde::{Deserialize, Deserializer};

/// Listing parameters (`?p=&c=`). Defaults and bounds are applied by
/// `idstore_core::pagination::page_request`; an empty value counts as
/// absent.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub p: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub c: Option<i32>,
}

/// Required `?id=` parameter of the update and delete endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: DbId,
}

/// Deserialize an optional integer query value, treating `p=` like a
/// missing parameter.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<i32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid integer: {v}"))),
    }
}

