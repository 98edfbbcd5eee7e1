use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a user followed the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum CheckinMode {
    /// Watched on television or a stream.
    Tv,
    /// Attended at the venue.
    InPerson,
}

impl CheckinMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckinMode::Tv => "tv",
            CheckinMode::InPerson => "in_person",
        }
    }
}

impl fmt::Display for CheckinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`CheckinMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl FromStr for CheckinMode {
    type Err = UnknownMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tv" => Ok(CheckinMode::Tv),
            "in_person" => Ok(CheckinMode::InPerson),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// A user row. `password` holds an Argon2 PHC string once credentials are attached.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserEntity {
    pub id: String,
    pub username: String,
    pub password: Option<String>,
    pub created_at: String,
}

/// A scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct GameEntity {
    pub id: String,
    pub league: String,
    /// Start time as submitted by whoever created the game.
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: Option<String>,
    pub created_at: String,
}

/// A check-in row as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinEntity {
    pub id: String,
    pub user_id: String,
    pub game_id: String,
    pub mode: CheckinMode,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub created_at: String,
}

/// A comment row as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntity {
    pub id: String,
    pub user_id: String,
    pub game_id: String,
    pub body: String,
    pub created_at: String,
}

/// Check-in joined with the author's display name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CheckinRecord {
    pub id: String,
    pub username: String,
    pub game_id: String,
    pub mode: CheckinMode,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub created_at: String,
}

impl CheckinRecord {
    /// Join a freshly written check-in with its author's name.
    pub fn from_entity(entity: CheckinEntity, username: String) -> Self {
        Self {
            id: entity.id,
            username,
            game_id: entity.game_id,
            mode: entity.mode,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }
}

/// Comment joined with the author's display name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: String,
    pub username: String,
    pub game_id: String,
    pub body: String,
    pub created_at: String,
}

impl CommentRecord {
    /// Join a freshly written comment with its author's name.
    pub fn from_entity(entity: CommentEntity, username: String) -> Self {
        Self {
            id: entity.id,
            username,
            game_id: entity.game_id,
            body: entity.body,
            created_at: entity.created_at,
        }
    }
}

/// Check-in joined with its author and the game it refers to.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FeedRecord {
    #[sqlx(flatten)]
    pub checkin: CheckinRecord,
    pub league: String,
    pub game_date: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: Option<String>,
}
