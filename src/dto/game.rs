use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::GameEntity,
    dto::{checkin::CheckinPayload, comment::CommentPayload, validation::validate_required},
};

/// Payload used to schedule a new game.
#[serde_as]
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub league: String,
    /// Start time of the game, RFC 3339 recommended.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub venue: Option<String>,
}

impl Validate for CreateGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [
            ("league", &self.league),
            ("date", &self.date),
            ("home_team", &self.home_team),
            ("away_team", &self.away_team),
        ] {
            if let Err(e) = validate_required(value) {
                errors.add(field, e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    pub id: String,
    pub league: String,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: Option<String>,
    pub created_at: String,
}

impl From<GameEntity> for GameResponse {
    fn from(entity: GameEntity) -> Self {
        Self {
            id: entity.id,
            league: entity.league,
            date: entity.date,
            home_team: entity.home_team,
            away_team: entity.away_team,
            venue: entity.venue,
            created_at: entity.created_at,
        }
    }
}

/// A game together with its discussion and check-ins, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameDetailResponse {
    pub game: GameResponse,
    pub comments: Vec<CommentPayload>,
    pub checkins: Vec<CheckinPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_all_reported() {
        let request: CreateGameRequest =
            serde_json::from_str(r#"{"league":"MLB","home_team":"  "}"#).unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("home_team"));
        assert!(fields.contains_key("away_team"));
        assert!(!fields.contains_key("league"));
    }

    #[test]
    fn venue_is_optional() {
        let request: CreateGameRequest = serde_json::from_str(
            r#"{"league":"NFL","date":"2024-09-08T17:00:00Z","home_team":"Packers","away_team":"Bears","venue":""}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.venue, None);
    }
}
