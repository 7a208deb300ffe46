use crate::{
    AppState,
    auth::{CurrentUser, hash_password},
    dto::{RegisterRequest, RegisterResponse, UserResponse, normalize_email},
    errors::ApiError,
    extract::JsonBody,
    models::{NewUser, User, utc_timestamp},
    store::{self, Table},
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;
use validator::Validate;

/// POST /api/v1/auth/register
/// Body: { "username": "...", "email": "...", "password": "..." }
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let email = normalize_email(&payload.email);

    let existing: Option<User> =
        store::get_one(state.store.as_ref(), Table::Users, "email", email.as_str()).await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already registered"));
    }

    let new_user = NewUser {
        username: payload.username,
        email,
        password_hash: hash_password(payload.password, state.hash_cost).await?,
        created_at: utc_timestamp(),
    };

    let user: User = store::insert_one(state.store.as_ref(), Table::Users, &new_user).await?;

    info!("New user registered: {} (id {})", user.email, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created",
            user: user.into(),
        }),
    ))
}

/// GET /api/v1/users/me
/// Headers: X-User-Email: <email>
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
