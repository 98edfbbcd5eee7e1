//! Store wrappers for exercising storage races in tests.

use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::BoxFuture;

use tempfile::TempDir;

use super::{
    ActivityStore,
    sqlite::{SqliteActivityStore, SqliteConfig},
};
use crate::dao::{
    models::{
        CheckinEntity, CheckinRecord, CommentEntity, CommentRecord, FeedRecord, GameEntity,
        UserEntity,
    },
    storage::StorageResult,
};

/// A pooled store on a database file inside `dir`, so that concurrent calls really
/// run on separate connections.
pub(crate) async fn file_store(dir: &TempDir) -> SqliteActivityStore {
    SqliteActivityStore::connect(SqliteConfig::from_path(dir.path().join("huddle.sqlite")))
        .await
        .unwrap()
}

/// Hides existing users from the first name lookup, as if another request
/// inserted the row right after we looked.
pub(crate) struct LateWriterStore {
    inner: SqliteActivityStore,
    hide_next_lookup: AtomicBool,
}

impl LateWriterStore {
    pub(crate) fn new(inner: SqliteActivityStore) -> Self {
        Self {
            inner,
            hide_next_lookup: AtomicBool::new(true),
        }
    }
}

impl ActivityStore for LateWriterStore {
    fn find_user(&self, id: String) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        self.inner.find_user(id)
    }

    fn find_user_by_name(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        if self.hide_next_lookup.swap(false, Ordering::SeqCst) {
            return Box::pin(async { Ok(None) });
        }
        self.inner.find_user_by_name(username)
    }

    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.insert_user(user)
    }

    fn attach_password(
        &self,
        user_id: String,
        password_hash: String,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        self.inner.attach_password(user_id, password_hash)
    }

    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.insert_game(game)
    }

    fn find_game(&self, id: String) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        self.inner.find_game(id)
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        self.inner.list_games()
    }

    fn count_games(&self) -> BoxFuture<'static, StorageResult<i64>> {
        self.inner.count_games()
    }

    fn insert_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.insert_checkin(checkin)
    }

    fn insert_comment(&self, comment: CommentEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.insert_comment(comment)
    }

    fn list_feed(&self, limit: u32) -> BoxFuture<'static, StorageResult<Vec<FeedRecord>>> {
        self.inner.list_feed(limit)
    }

    fn list_game_checkins(
        &self,
        game_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<CheckinRecord>>> {
        self.inner.list_game_checkins(game_id)
    }

    fn list_game_comments(
        &self,
        game_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<CommentRecord>>> {
        self.inner.list_game_comments(game_id)
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.health_check()
    }
}
