use futures::future::BoxFuture;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
    schema::SCHEMA,
};
use crate::dao::{
    activity_store::ActivityStore,
    models::{
        CheckinEntity, CheckinRecord, CommentEntity, CommentRecord, FeedRecord, GameEntity,
        UserEntity,
    },
    storage::StorageResult,
};

/// [`ActivityStore`] backed by a SQLite connection pool.
///
/// Cloning is cheap; the pool is reference-counted.
#[derive(Clone)]
pub struct SqliteActivityStore {
    pool: SqlitePool,
}

impl SqliteActivityStore {
    /// Open the pool and apply the schema.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.in_memory {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(config.options)
            .await
            .map_err(|source| SqliteDaoError::Connect { source })?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Shortcut for a private in-memory store.
    pub async fn in_memory() -> SqliteResult<Self> {
        Self::connect(SqliteConfig::in_memory()?).await
    }

    async fn init_schema(&self) -> SqliteResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|source| SqliteDaoError::Schema { source })?;
        Ok(())
    }
}

impl ActivityStore for SqliteActivityStore {
    fn find_user(&self, id: String) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, UserEntity>(
                "SELECT id, username, password, created_at FROM users WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(SqliteDaoError::query("find_user"))
            .map_err(Into::into)
        })
    }

    fn find_user_by_name(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, UserEntity>(
                "SELECT id, username, password, created_at FROM users WHERE username = ?",
            )
            .bind(username)
            .fetch_optional(&pool)
            .await
            .map_err(SqliteDaoError::query("find_user_by_name"))
            .map_err(Into::into)
        })
    }

    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query("INSERT INTO users (id, username, password, created_at) VALUES (?, ?, ?, ?)")
                .bind(user.id)
                .bind(user.username)
                .bind(user.password)
                .bind(user.created_at)
                .execute(&pool)
                .await
                .map_err(|source| SqliteDaoError::from_insert("users", source))?;
            Ok(())
        })
    }

    fn attach_password(
        &self,
        user_id: String,
        password_hash: String,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let result =
                sqlx::query("UPDATE users SET password = ? WHERE id = ? AND password IS NULL")
                    .bind(password_hash)
                    .bind(user_id)
                    .execute(&pool)
                    .await
                    .map_err(SqliteDaoError::query("attach_password"))?;
            Ok(result.rows_affected() == 1)
        })
    }

    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO games (id, league, date, home_team, away_team, venue, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(game.id)
            .bind(game.league)
            .bind(game.date)
            .bind(game.home_team)
            .bind(game.away_team)
            .bind(game.venue)
            .bind(game.created_at)
            .execute(&pool)
            .await
            .map_err(|source| SqliteDaoError::from_insert("games", source))?;
            Ok(())
        })
    }

    fn find_game(&self, id: String) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, GameEntity>(
                "SELECT id, league, date, home_team, away_team, venue, created_at \
                 FROM games WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(SqliteDaoError::query("find_game"))
            .map_err(Into::into)
        })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, GameEntity>(
                "SELECT id, league, date, home_team, away_team, venue, created_at \
                 FROM games ORDER BY date DESC, rowid DESC",
            )
            .fetch_all(&pool)
            .await
            .map_err(SqliteDaoError::query("list_games"))
            .map_err(Into::into)
        })
    }

    fn count_games(&self) -> BoxFuture<'static, StorageResult<i64>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM games")
                .fetch_one(&pool)
                .await
                .map_err(SqliteDaoError::query("count_games"))?;
            Ok(count)
        })
    }

    fn insert_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO checkins (id, user_id, game_id, mode, rating, comment, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(checkin.id)
            .bind(checkin.user_id)
            .bind(checkin.game_id)
            .bind(checkin.mode)
            .bind(checkin.rating)
            .bind(checkin.comment)
            .bind(checkin.created_at)
            .execute(&pool)
            .await
            .map_err(|source| SqliteDaoError::from_insert("checkins", source))?;
            Ok(())
        })
    }

    fn insert_comment(&self, comment: CommentEntity) -> BoxFuture<'static, StorageResult<()>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO comments (id, user_id, game_id, body, created_at) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(comment.id)
            .bind(comment.user_id)
            .bind(comment.game_id)
            .bind(comment.body)
            .bind(comment.created_at)
            .execute(&pool)
            .await
            .map_err(|source| SqliteDaoError::from_insert("comments", source))?;
            Ok(())
        })
    }

    fn list_feed(&self, limit: u32) -> BoxFuture<'static, StorageResult<Vec<FeedRecord>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, FeedRecord>(
                "SELECT ch.id, u.username, ch.game_id, ch.mode, ch.rating, ch.comment, ch.created_at, \
                        g.league, g.date AS game_date, g.home_team, g.away_team, g.venue \
                 FROM checkins ch \
                 JOIN games g ON ch.game_id = g.id \
                 JOIN users u ON ch.user_id = u.id \
                 ORDER BY ch.created_at DESC, ch.rowid DESC \
                 LIMIT ?",
            )
            .bind(limit)
            .fetch_all(&pool)
            .await
            .map_err(SqliteDaoError::query("list_feed"))
            .map_err(Into::into)
        })
    }

    fn list_game_checkins(
        &self,
        game_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<CheckinRecord>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, CheckinRecord>(
                "SELECT ch.id, u.username, ch.game_id, ch.mode, ch.rating, ch.comment, ch.created_at \
                 FROM checkins ch JOIN users u ON ch.user_id = u.id \
                 WHERE ch.game_id = ? \
                 ORDER BY ch.created_at DESC, ch.rowid DESC",
            )
            .bind(game_id)
            .fetch_all(&pool)
            .await
            .map_err(SqliteDaoError::query("list_game_checkins"))
            .map_err(Into::into)
        })
    }

    fn list_game_comments(
        &self,
        game_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<CommentRecord>>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query_as::<_, CommentRecord>(
                "SELECT c.id, u.username, c.game_id, c.body, c.created_at \
                 FROM comments c JOIN users u ON c.user_id = u.id \
                 WHERE c.game_id = ? \
                 ORDER BY c.created_at DESC, c.rowid DESC",
            )
            .bind(game_id)
            .fetch_all(&pool)
            .await
            .map_err(SqliteDaoError::query("list_game_comments"))
            .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&pool)
                .await
                .map_err(SqliteDaoError::query("health_check"))?;
            Ok(())
        })
    }
}
