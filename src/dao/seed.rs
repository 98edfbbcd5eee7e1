use time::{Duration, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::{
        activity_store::ActivityStore,
        models::{GameEntity, UserEntity},
        storage::StorageResult,
    },
    dto::format_timestamp,
};

const DEMO_USERNAME: &str = "Guest123";

struct DemoGame {
    league: &'static str,
    starts_in: Duration,
    home_team: &'static str,
    away_team: &'static str,
    venue: &'static str,
}

const DEMO_GAMES: [DemoGame; 3] = [
    DemoGame {
        league: "MLB",
        starts_in: Duration::ZERO,
        home_team: "Chicago Cubs",
        away_team: "St. Louis Cardinals",
        venue: "Wrigley Field",
    },
    DemoGame {
        league: "MLB",
        starts_in: Duration::DAY,
        home_team: "Chicago White Sox",
        away_team: "Minnesota Twins",
        venue: "Guaranteed Rate Field",
    },
    DemoGame {
        league: "NFL",
        starts_in: Duration::ZERO,
        home_team: "Green Bay Packers",
        away_team: "Chicago Bears",
        venue: "Lambeau Field",
    },
];

/// Insert a handful of demo games and a guest user when the game table is empty.
///
/// Returns whether anything was inserted.
pub async fn seed_demo_data(store: &dyn ActivityStore) -> StorageResult<bool> {
    if store.count_games().await? > 0 {
        return Ok(false);
    }

    let now = OffsetDateTime::now_utc();
    for demo in &DEMO_GAMES {
        store
            .insert_game(GameEntity {
                id: Uuid::new_v4().to_string(),
                league: demo.league.into(),
                date: format_timestamp(now + demo.starts_in),
                home_team: demo.home_team.into(),
                away_team: demo.away_team.into(),
                venue: Some(demo.venue.into()),
                created_at: format_timestamp(now),
            })
            .await?;
    }

    if store
        .find_user_by_name(DEMO_USERNAME.into())
        .await?
        .is_none()
    {
        store
            .insert_user(UserEntity {
                id: Uuid::new_v4().to_string(),
                username: DEMO_USERNAME.into(),
                password: None,
                created_at: format_timestamp(now),
            })
            .await?;
    }

    info!(games = DEMO_GAMES.len(), "seeded demo data");
    Ok(true)
}
