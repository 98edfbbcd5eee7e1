pub mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

use crate::dao::models::{
    CheckinEntity, CheckinRecord, CommentEntity, CommentRecord, FeedRecord, GameEntity, UserEntity,
};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the relational store holding users, games and their activity.
///
/// Every call is a suspension point; individual writes are atomic but no call spans a
/// transaction across several of them.
pub trait ActivityStore: Send + Sync {
    fn find_user(&self, id: String) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    fn find_user_by_name(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    /// Insert a user, failing with [`StorageError::Conflict`](crate::dao::storage::StorageError::Conflict)
    /// when the name is already taken.
    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Attach a credential to a user that has none yet. Returns whether a row changed.
    fn attach_password(
        &self,
        user_id: String,
        password_hash: String,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    fn insert_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_game(&self, id: String) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// All games, latest start first.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn count_games(&self) -> BoxFuture<'static, StorageResult<i64>>;
    fn insert_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn insert_comment(&self, comment: CommentEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Most recent check-ins across all games, newest first.
    fn list_feed(&self, limit: u32) -> BoxFuture<'static, StorageResult<Vec<FeedRecord>>>;
    fn list_game_checkins(
        &self,
        game_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<CheckinRecord>>>;
    fn list_game_comments(
        &self,
        game_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<CommentRecord>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
