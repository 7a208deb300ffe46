//! Caller identity and password hashing.
//!
//! The caller is whoever owns the email in the `X-User-Email` header. There is
//! no credential check at all, so any client that knows a registered email can
//! act as that user. The lookup sits behind [`IdentityResolver`] so a signed
//! credential can replace it without touching the route handlers.

use crate::{
    AppState,
    errors::ApiError,
    models::User,
    store::{self, DataStore, Table},
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, warn};

pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Result<User, ApiError>;
}

/// Resolves the caller by exact email match against the `users` table.
pub struct HeaderIdentity {
    store: Arc<dyn DataStore>,
}

impl HeaderIdentity {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

pub fn caller_email(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(USER_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|email| !email.is_empty())
        .ok_or(ApiError::Unauthenticated("Missing X-User-Email header"))
}

#[async_trait]
impl IdentityResolver for HeaderIdentity {
    async fn resolve(&self, headers: &HeaderMap) -> Result<User, ApiError> {
        let email = caller_email(headers).inspect_err(|_| warn!("Request without identity"))?;

        let user: Option<User> =
            store::get_one(self.store.as_ref(), Table::Users, "email", email).await?;

        match user {
            Some(user) => {
                debug!("Resolved caller {} as user {}", user.email, user.id);
                Ok(user)
            }
            None => {
                warn!("Unknown caller email: {}", email);
                Err(ApiError::Unauthenticated("User not found"))
            }
        }
    }
}

/// The resolved caller, available to any handler that takes it as an argument.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state.identity.resolve(&parts.headers).await.map(CurrentUser)
    }
}

/// Salted bcrypt hash, computed off the async workers.
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::InternalError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))
}
