mod requests;
mod responses;

pub use requests::{CreatePostRequest, RegisterRequest, normalize_email};
pub use responses::{
    CreatePostResponse, MessageResponse, PostListResponse, RegisterResponse, RegisteredUser,
    UserResponse,
};
