use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{dao::models::FeedRecord, dto::checkin::CheckinPayload};

/// Query string accepted by `GET /api/feed`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Maximum number of entries; clamped to the configured maximum.
    pub limit: Option<u32>,
}

/// A check-in enriched with the game it refers to.
///
/// Carries every [`CheckinPayload`] field under the same name so clients can merge
/// live `checkin:new` events into a fetched feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub checkin: CheckinPayload,
    pub league: String,
    pub game_date: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: Option<String>,
}

impl From<FeedRecord> for FeedEntry {
    fn from(record: FeedRecord) -> Self {
        Self {
            checkin: record.checkin.into(),
            league: record.league,
            game_date: record.game_date,
            home_team: record.home_team,
            away_team: record.away_team,
            venue: record.venue,
        }
    }
}
