//! Session-based credential login, independent from anonymous check-in identity.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;
use time::OffsetDateTime;
use tower_sessions::Session;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::{activity_store::ActivityStore, models::UserEntity},
    dto::{
        auth::{CredentialsRequest, UserResponse},
        format_timestamp,
        validation::normalize_display_name,
    },
    error::ServiceError,
    state::SharedState,
};

/// Session key holding the logged-in user's id.
const USER_ID_KEY: &str = "user_id";

/// Create an account, or attach a password to an anonymous user of the same name.
pub async fn register(
    state: &SharedState,
    session: &Session,
    request: CredentialsRequest,
) -> Result<UserResponse, ServiceError> {
    let (username, password) = credentials(request)?;
    let store = state.store();
    let password_hash = hash_password(&password)?;

    let user = match store.find_user_by_name(username.clone()).await? {
        Some(user) => claim_anonymous(store, user, password_hash).await?,
        None => {
            let user = UserEntity {
                id: Uuid::new_v4().to_string(),
                username: username.clone(),
                password: Some(password_hash.clone()),
                created_at: format_timestamp(OffsetDateTime::now_utc()),
            };
            match store.insert_user(user.clone()).await {
                Ok(()) => {
                    info!(user_id = %user.id, "registered user");
                    user
                }
                // an anonymous check-in created the name after our lookup
                Err(err) if err.is_conflict() => {
                    warn!(username = %username, "registration raced user creation; retrying lookup");
                    let existing = store
                        .find_user_by_name(username.clone())
                        .await?
                        .ok_or_else(|| already_registered(&username))?;
                    claim_anonymous(store, existing, password_hash).await?
                }
                Err(err) => return Err(err.into()),
            }
        }
    };

    start_session(session, &user.id).await?;
    Ok(user.into())
}

/// Check credentials and bind the session to the user.
pub async fn login(
    state: &SharedState,
    session: &Session,
    request: CredentialsRequest,
) -> Result<UserResponse, ServiceError> {
    let (username, password) = credentials(request)?;

    let user = state
        .store()
        .find_user_by_name(username)
        .await?
        .ok_or_else(invalid_credentials)?;
    let stored = user.password.as_deref().ok_or_else(invalid_credentials)?;

    if !verify_password(&password, stored) {
        warn!(user_id = %user.id, "rejected login");
        return Err(invalid_credentials());
    }

    start_session(session, &user.id).await?;
    info!(user_id = %user.id, "user logged in");
    Ok(user.into())
}

/// Forget the current session, if any.
pub async fn logout(session: &Session) -> Result<(), ServiceError> {
    session.flush().await?;
    Ok(())
}

/// The user bound to the current session.
pub async fn me(state: &SharedState, session: &Session) -> Result<UserResponse, ServiceError> {
    let user_id: String = session
        .get(USER_ID_KEY)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("not logged in".into()))?;

    state
        .store()
        .find_user(user_id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| ServiceError::Unauthorized("not logged in".into()))
}

fn credentials(request: CredentialsRequest) -> Result<(String, String), ServiceError> {
    request.validate()?;
    let username = normalize_display_name(&request.username)
        .ok_or_else(|| ServiceError::MissingField("username".into()))?;
    Ok((username, request.password))
}

async fn start_session(session: &Session, user_id: &str) -> Result<(), ServiceError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Attach a password to a user created by an anonymous check-in.
async fn claim_anonymous(
    store: &dyn ActivityStore,
    user: UserEntity,
    password_hash: String,
) -> Result<UserEntity, ServiceError> {
    if user.password.is_some()
        || !store
            .attach_password(user.id.clone(), password_hash.clone())
            .await?
    {
        return Err(already_registered(&user.username));
    }
    info!(user_id = %user.id, "attached credentials to anonymous user");
    Ok(UserEntity {
        password: Some(password_hash),
        ..user
    })
}

fn already_registered(username: &str) -> ServiceError {
    ServiceError::Conflict(format!("user `{username}` is already registered"))
}

fn invalid_credentials() -> ServiceError {
    ServiceError::Unauthorized("invalid username or password".into())
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Internal(format!("failed to hash password: {err}")))
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}
