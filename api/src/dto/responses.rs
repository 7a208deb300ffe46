use crate::models::{Post, User};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: RegisteredUser,
}

/// Public slice of a freshly registered user. Never carries the hash.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub message: &'static str,
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
