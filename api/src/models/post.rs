use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A post row exactly as the store holds it.
///
/// Rows written by other clients may carry extra columns or a null author, so
/// the row is kept whole and only the fields the handlers need are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(pub Map<String, Value>);

impl Post {
    pub fn author_id(&self) -> Option<i64> {
        self.0.get("author_id").and_then(Value::as_i64)
    }

    /// The id for log lines; `?` when the store returned none.
    pub fn id_display(&self) -> String {
        self.0
            .get("id")
            .map(Value::to_string)
            .unwrap_or_else(|| "?".to_owned())
    }
}

/// Row sent to the store; `id` is assigned there.
#[derive(Debug, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: String,
}
