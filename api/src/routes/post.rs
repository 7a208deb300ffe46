use crate::{
    AppState,
    auth::CurrentUser,
    dto::{CreatePostRequest, CreatePostResponse, MessageResponse, PostListResponse},
    errors::ApiError,
    extract::{JsonBody, PathParam},
    models::{NewPost, Post, utc_timestamp},
    store::{self, Table},
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

/// GET /api/v1/posts
/// Headers: X-User-Email: <email>
///
/// Every post, in whatever order the store returns them.
pub async fn list_posts(
    State(state): State<AppState>,
    _caller: CurrentUser,
) -> Result<Json<PostListResponse>, ApiError> {
    let posts = store::get_all(state.store.as_ref(), Table::Posts).await?;

    Ok(Json(PostListResponse { posts }))
}

/// POST /api/v1/posts
/// Headers: X-User-Email: <email>
/// Body: { "title": "...", "content": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    JsonBody(payload): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let new_post = NewPost {
        title: payload.title,
        content: payload.content,
        author_id: caller.id,
        created_at: utc_timestamp(),
    };

    let post: Post = store::insert_one(state.store.as_ref(), Table::Posts, &new_post).await?;

    info!("Post created: {} by user {}", post.id_display(), caller.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created",
            post,
        }),
    ))
}

/// GET /api/v1/posts/{id}
/// Headers: X-User-Email: <email>
pub async fn get_post(
    State(state): State<AppState>,
    _caller: CurrentUser,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Post>, ApiError> {
    let post = store::get_one(state.store.as_ref(), Table::Posts, "id", id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(post))
}

/// DELETE /api/v1/posts/{id}
/// Headers: X-User-Email: <email>
///
/// Only the author may delete. The lookup and the delete are two separate
/// store calls, so a concurrent delete of the same post can slip in between.
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    PathParam(id): PathParam<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let post: Post = store::get_one(state.store.as_ref(), Table::Posts, "id", id)
        .await?
        .ok_or(ApiError::NotFound)?;

    // Check ownership; a row without an author belongs to nobody
    if post.author_id() != Some(caller.id) {
        return Err(ApiError::Forbidden);
    }

    store::delete_where(state.store.as_ref(), Table::Posts, "id", id).await?;

    info!("Post deleted: {} by user {}", id, caller.id);

    Ok(Json(MessageResponse {
        message: "Post deleted",
    }))
}
