use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::ToSchema;

use crate::dao::models::{CheckinMode, CheckinRecord};

/// Body of `POST /api/checkins`.
///
/// Every field is optional at the wire level so that missing values surface as
/// `MissingField` rather than a deserialization failure.
#[serde_as]
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCheckinRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub game_id: Option<String>,
    /// `tv` or `in_person`.
    #[serde(default)]
    pub mode: Option<String>,
    /// 1 to 5 when present. Any JSON number is accepted here so that fractional or
    /// oversized values are reported as out of range; non-numbers fail to parse.
    #[serde(default)]
    #[schema(value_type = Option<i64>, minimum = 1, maximum = 5)]
    pub rating: Option<serde_json::Number>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub comment: Option<String>,
}

/// Check-in as returned by the REST API and pushed as `checkin:new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckinPayload {
    pub id: String,
    pub username: String,
    pub game_id: String,
    pub mode: CheckinMode,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<CheckinRecord> for CheckinPayload {
    fn from(record: CheckinRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            game_id: record.game_id,
            mode: record.mode,
            rating: record.rating,
            comment: record.comment,
            created_at: record.created_at,
        }
    }
}
