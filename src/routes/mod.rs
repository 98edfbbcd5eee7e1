use axum::Router;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

use crate::state::SharedState;

pub mod auth;
pub mod checkin;
pub mod docs;
pub mod feed;
pub mod game;
pub mod health;
pub mod websocket;

/// Compose all route trees, wiring in shared state, sessions and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config().session_idle_minutes,
        )));

    let api_router = health::router()
        .merge(feed::router())
        .merge(game::router())
        .merge(checkin::router())
        .merge(auth::router())
        .merge(websocket::router())
        .merge(docs::router());

    api_router.with_state(state).layer(session_layer)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        extract::ws::Message,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use super::*;
    use crate::{dao::models::GameEntity, state::test_state};

    async fn seeded_state() -> SharedState {
        let state = test_state().await;
        state
            .store()
            .insert_game(GameEntity {
                id: "G1".into(),
                league: "MLB".into(),
                date: "2024-05-01T18:00:00.000Z".into(),
                home_team: "Chicago Cubs".into(),
                away_team: "St. Louis Cardinals".into(),
                venue: Some("Wrigley Field".into()),
                created_at: "2024-04-01T00:00:00.000Z".into(),
            })
            .await
            .unwrap();
        state
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn checkin_is_returned_pushed_and_listed() {
        let state = seeded_state().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _membership = state.rooms().connect(tx);
        let app = router(state);

        let response = app
            .clone()
            .oneshot(post(
                "/api/checkins",
                json!({"username": "Ada", "game_id": "G1", "mode": "tv", "rating": 4}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert_eq!(created["username"], "Ada");
        assert_eq!(created["game_id"], "G1");
        assert_eq!(created["mode"], "tv");
        assert_eq!(created["rating"], 4);
        assert!(created["comment"].is_null());

        let Ok(Message::Text(frame)) = rx.try_recv() else {
            panic!("expected a checkin:new frame");
        };
        let frame: Value = serde_json::from_str(frame.as_str()).unwrap();
        assert_eq!(frame["event"], "checkin:new");
        assert_eq!(frame["data"], created);

        let feed = json_body(app.oneshot(get("/api/feed")).await.unwrap()).await;
        let first = &feed[0];
        for field in ["id", "username", "game_id", "mode", "rating", "comment", "created_at"] {
            assert_eq!(first[field], created[field], "{field}");
        }
        assert_eq!(first["home_team"], "Chicago Cubs");
        assert_eq!(first["venue"], "Wrigley Field");
    }

    #[tokio::test]
    async fn empty_comment_is_a_missing_field() {
        let state = seeded_state().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let membership = state.rooms().connect(tx);
        membership.join("G1");
        let app = router(state);

        let response = app
            .clone()
            .oneshot(post(
                "/api/games/G1/comments",
                json!({"username": "Ada", "body": ""}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "MissingField");
        assert!(rx.try_recv().is_err());

        let detail = json_body(app.oneshot(get("/api/games/G1")).await.unwrap()).await;
        assert_eq!(detail["comments"], json!([]));
    }

    #[tokio::test]
    async fn comment_push_matches_game_detail() {
        let state = seeded_state().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let membership = state.rooms().connect(tx);
        membership.join("G1");
        let app = router(state);

        let response = app
            .clone()
            .oneshot(post(
                "/api/games/G1/comments",
                json!({"username": "Ada", "body": "Go Cubs"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(Message::Text(frame)) = rx.try_recv() else {
            panic!("expected a comment:new frame");
        };
        let frame: Value = serde_json::from_str(frame.as_str()).unwrap();
        assert_eq!(frame["event"], "comment:new");

        let detail = json_body(app.oneshot(get("/api/games/G1")).await.unwrap()).await;
        assert_eq!(detail["comments"][0], frame["data"]);
        assert_eq!(detail["game"]["id"], "G1");
    }

    #[tokio::test]
    async fn validation_errors_map_to_statuses() {
        let app = router(seeded_state().await);
        let cases = [
            (
                json!({"username": "Ada", "game_id": "G1", "mode": "radio"}),
                StatusCode::BAD_REQUEST,
                "InvalidEnum",
            ),
            (
                json!({"username": "Ada", "game_id": "G1", "mode": "tv", "rating": 0}),
                StatusCode::BAD_REQUEST,
                "OutOfRange",
            ),
            (
                json!({"username": "Ada", "game_id": "G1", "mode": "tv", "rating": 1000.0}),
                StatusCode::BAD_REQUEST,
                "OutOfRange",
            ),
            (
                json!({"username": "Ada", "game_id": "G1", "mode": "tv", "rating": 2.5}),
                StatusCode::BAD_REQUEST,
                "OutOfRange",
            ),
            (
                json!({"username": "Ada", "game_id": "G1", "mode": "tv", "rating": 1e20}),
                StatusCode::BAD_REQUEST,
                "OutOfRange",
            ),
            (
                json!({"username": "Ada", "game_id": "G1", "mode": "tv", "rating": "4"}),
                StatusCode::BAD_REQUEST,
                "BadRequest",
            ),
            (
                json!({"game_id": "G1", "mode": "tv"}),
                StatusCode::BAD_REQUEST,
                "MissingField",
            ),
            (
                json!({"username": "Ada", "game_id": "G9", "mode": "tv"}),
                StatusCode::NOT_FOUND,
                "NotFound",
            ),
        ];

        for (body, status, kind) in cases {
            let response = app.clone().oneshot(post("/api/checkins", body)).await.unwrap();
            assert_eq!(response.status(), status);
            assert_eq!(json_body(response).await["error"], kind);
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = router(seeded_state().await);
        let request = Request::post("/api/checkins")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "BadRequest");
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let app = router(seeded_state().await);
        let response = app.oneshot(get("/api/games/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn games_can_be_created_and_listed() {
        let app = router(test_state().await);

        let response = app
            .clone()
            .oneshot(post(
                "/api/games",
                json!({"league": "NFL", "date": "2024-09-08T17:00:00Z",
                       "home_team": "Green Bay Packers", "away_team": "Chicago Bears"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert!(created["venue"].is_null());

        let response = app
            .clone()
            .oneshot(post("/api/games", json!({"league": "NFL"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let games = json_body(app.oneshot(get("/api/games")).await.unwrap()).await;
        assert_eq!(games, json!([created]));
    }

    #[tokio::test]
    async fn feed_limit_is_read_from_the_query() {
        let state = seeded_state().await;
        let app = router(state);
        for name in ["Ada", "Bo", "Cy"] {
            app.clone()
                .oneshot(post(
                    "/api/checkins",
                    json!({"username": name, "game_id": "G1", "mode": "tv"}),
                ))
                .await
                .unwrap();
        }

        let feed = json_body(app.clone().oneshot(get("/api/feed?limit=2")).await.unwrap()).await;
        assert_eq!(feed.as_array().unwrap().len(), 2);
        assert_eq!(feed[0]["username"], "Cy");

        let response = app.oneshot(get("/api/feed?limit=lots")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_follows_register_and_logout() {
        let app = router(test_state().await);

        let response = app.clone().oneshot(get("/api/me")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post("/api/register", json!({"username": "Ada", "password": "pw"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .unwrap()
            .to_string();

        let me = Request::get("/api/me")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(me).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["username"], "Ada");

        let logout = Request::post("/api/logout")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(logout).await.unwrap();
        assert_eq!(json_body(response).await, json!({"ok": true}));

        let me = Request::get("/api/me")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(me).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let app = router(test_state().await);
        let response = app.oneshot(get("/healthcheck")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }
}
