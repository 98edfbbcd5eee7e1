use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::CommentRecord;

/// Body of `POST /api/games/{id}/comments`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Comment as returned by the REST API and pushed as `comment:new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentPayload {
    pub id: String,
    pub username: String,
    pub game_id: String,
    pub body: String,
    pub created_at: String,
}

impl From<CommentRecord> for CommentPayload {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            game_id: record.game_id,
            body: record.body,
            created_at: record.created_at,
        }
    }
}
