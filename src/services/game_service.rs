use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::GameEntity,
    dto::{
        format_timestamp,
        game::{CreateGameRequest, GameResponse},
    },
    error::ServiceError,
    state::SharedState,
};

/// All games, latest start first.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameResponse>, ServiceError> {
    let games = state.store().list_games().await?;
    Ok(games.into_iter().map(GameResponse::from).collect())
}

/// Schedule a new game from an administrative request.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameResponse, ServiceError> {
    request.validate()?;

    let entity = GameEntity {
        id: Uuid::new_v4().to_string(),
        league: request.league,
        date: request.date,
        home_team: request.home_team,
        away_team: request.away_team,
        venue: request.venue,
        created_at: format_timestamp(OffsetDateTime::now_utc()),
    };
    state.store().insert_game(entity.clone()).await?;

    info!(game_id = %entity.id, league = %entity.league, "created game");
    Ok(entity.into())
}
