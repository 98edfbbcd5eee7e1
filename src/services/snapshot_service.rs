//! Historical views that clients load on start or after a reconnect.
//!
//! Entries carry the same fields as the live push payloads so clients can merge
//! both sources without translation.

use crate::{
    dto::{
        checkin::CheckinPayload, comment::CommentPayload, feed::FeedEntry,
        game::GameDetailResponse,
    },
    error::ServiceError,
    state::SharedState,
};

/// Most recent check-ins across all games, newest first.
pub async fn list_feed(
    state: &SharedState,
    limit: Option<u32>,
) -> Result<Vec<FeedEntry>, ServiceError> {
    let limit = state.config().feed_limit_for(limit);
    let records = state.store().list_feed(limit).await?;
    Ok(records.into_iter().map(FeedEntry::from).collect())
}

/// A game with its comments and check-ins, each newest first.
pub async fn get_game(state: &SharedState, id: &str) -> Result<GameDetailResponse, ServiceError> {
    let store = state.store();
    let game = store
        .find_game(id.to_string())
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("game `{id}` not found")))?;

    let (comments, checkins) = tokio::try_join!(
        store.list_game_comments(id.to_string()),
        store.list_game_checkins(id.to_string()),
    )?;

    Ok(GameDetailResponse {
        game: game.into(),
        comments: comments.into_iter().map(CommentPayload::from).collect(),
        checkins: checkins.into_iter().map(CheckinPayload::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::models::{CheckinEntity, CheckinMode, GameEntity, UserEntity},
        state::test_state,
    };

    async fn seed(state: &SharedState) {
        let store = state.store();
        for id in ["G1", "G2"] {
            store
                .insert_game(GameEntity {
                    id: id.into(),
                    league: "NFL".into(),
                    date: "2024-09-08T17:00:00.000Z".into(),
                    home_team: "Green Bay Packers".into(),
                    away_team: "Chicago Bears".into(),
                    venue: Some("Lambeau Field".into()),
                    created_at: "2024-09-01T00:00:00.000Z".into(),
                })
                .await
                .unwrap();
        }
        store
            .insert_user(UserEntity {
                id: "u1".into(),
                username: "Ada".into(),
                password: None,
                created_at: "2024-09-01T00:00:00.000Z".into(),
            })
            .await
            .unwrap();
        for (n, game_id) in ["G1", "G2", "G1"].into_iter().enumerate() {
            store
                .insert_checkin(CheckinEntity {
                    id: format!("c{n}"),
                    user_id: "u1".into(),
                    game_id: game_id.into(),
                    mode: CheckinMode::InPerson,
                    rating: None,
                    comment: None,
                    created_at: format!("2024-09-08T17:0{n}:00.000Z"),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn feed_is_newest_first_and_denormalized() {
        let state = test_state().await;
        seed(&state).await;

        let feed = list_feed(&state, None).await.unwrap();
        let ids: Vec<_> = feed.iter().map(|e| e.checkin.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c1", "c0"]);
        assert_eq!(feed[0].checkin.username, "Ada");
        assert_eq!(feed[0].home_team, "Green Bay Packers");
        assert_eq!(feed[0].venue.as_deref(), Some("Lambeau Field"));
    }

    #[tokio::test]
    async fn feed_honours_the_limit() {
        let state = test_state().await;
        seed(&state).await;

        assert_eq!(list_feed(&state, Some(2)).await.unwrap().len(), 2);
        assert_eq!(list_feed(&state, Some(0)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn game_detail_is_scoped() {
        let state = test_state().await;
        seed(&state).await;

        let detail = get_game(&state, "G1").await.unwrap();
        assert_eq!(detail.game.id, "G1");
        let ids: Vec<_> = detail.checkins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c0"]);
        assert!(detail.comments.is_empty());
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let state = test_state().await;
        let err = get_game(&state, "missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
