mod health;
mod post;
mod user;

pub use health::health_check;
pub use post::{create_post, delete_post, get_post, list_posts};
pub use user::{current_user, register};
