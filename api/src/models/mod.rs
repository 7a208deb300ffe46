mod post;
mod user;

pub use post::{NewPost, Post};
pub use user::{NewUser, User};

use chrono::{SecondsFormat, Utc};

/// Current time as ISO-8601 UTC with a `Z` suffix, e.g.
/// `2025-01-31T09:30:00.123456Z`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
