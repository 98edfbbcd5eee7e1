//! Turns free-text display names into stable user records.

use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::{activity_store::ActivityStore, models::UserEntity},
    dto::{format_timestamp, validation::normalize_display_name},
    error::ServiceError,
};

/// Return the user named `display_name`, creating an anonymous one when absent.
///
/// The name is normalized first. When a concurrent call wins the insert race the
/// unique index rejects ours; the lookup is retried once before giving up.
pub async fn resolve(
    store: &dyn ActivityStore,
    display_name: &str,
) -> Result<UserEntity, ServiceError> {
    let username = normalize_display_name(display_name)
        .ok_or_else(|| ServiceError::MissingField("username".into()))?;

    if let Some(user) = store.find_user_by_name(username.clone()).await? {
        return Ok(user);
    }

    let user = UserEntity {
        id: Uuid::new_v4().to_string(),
        username: username.clone(),
        password: None,
        created_at: format_timestamp(OffsetDateTime::now_utc()),
    };

    match store.insert_user(user.clone()).await {
        Ok(()) => {
            info!(user_id = %user.id, username = %user.username, "created anonymous user");
            Ok(user)
        }
        Err(err) if err.is_conflict() => {
            warn!(username = %username, "user creation raced; retrying lookup");
            store
                .find_user_by_name(username.clone())
                .await?
                .ok_or_else(|| {
                    ServiceError::Conflict(format!("user `{username}` could not be resolved"))
                })
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use tempfile::TempDir;

    use super::*;
    use crate::dao::activity_store::{
        sqlite::SqliteActivityStore,
        testing::{LateWriterStore, file_store},
    };

    #[tokio::test]
    async fn resolving_twice_returns_the_same_user() {
        let store = SqliteActivityStore::in_memory().await.unwrap();

        let first = resolve(&store, "Ada").await.unwrap();
        let second = resolve(&store, "  Ada ").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.username, "Ada");
        assert!(second.password.is_none());
    }

    #[tokio::test]
    async fn blank_names_are_missing() {
        let store = SqliteActivityStore::in_memory().await.unwrap();
        let err = resolve(&store, "   ").await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingField(field) if field == "username"));
    }

    #[tokio::test]
    async fn long_names_are_truncated_before_lookup() {
        let store = SqliteActivityStore::in_memory().await.unwrap();
        let long = "z".repeat(50);

        let first = resolve(&store, &long).await.unwrap();
        let second = resolve(&store, &"z".repeat(45)).await.unwrap();

        assert_eq!(first.username.chars().count(), 40);
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn lost_insert_race_falls_back_to_lookup() {
        let inner = SqliteActivityStore::in_memory().await.unwrap();
        let existing = resolve(&inner, "Zed").await.unwrap();
        let store = LateWriterStore::new(inner);

        let resolved = resolve(&store, "Zed").await.unwrap();

        assert_eq!(resolved.id, existing.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_resolves_agree_on_one_user() {
        let dir = TempDir::new().unwrap();
        let store: Arc<dyn ActivityStore> = Arc::new(file_store(&dir).await);

        for round in 0..10 {
            let name = format!("Zed{round}");
            let tasks: Vec<_> = (0..8)
                .map(|_| {
                    let store = Arc::clone(&store);
                    let name = name.clone();
                    tokio::spawn(async move { resolve(store.as_ref(), &name).await })
                })
                .collect();

            let mut ids = HashSet::new();
            for task in tasks {
                ids.insert(task.await.unwrap().unwrap().id);
            }
            assert_eq!(ids.len(), 1, "{name}");
        }
    }
}
