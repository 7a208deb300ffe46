//! Data Store access.
//!
//! Everything persistent lives in an external store that exposes row-level
//! operations over named tables. Handlers never talk to it directly: they go
//! through the typed helpers at the bottom of this module, which in turn call
//! a [`DataStore`] implementation.

pub mod memory;
pub mod postgrest;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

/// The two collections this service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Posts,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Posts => "posts",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("data store rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected data store payload: {0}")]
    Decode(String),
}

/// Row-level operations against the external store.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// `select * from {table} where {column} = {value} limit 1`
    async fn select_one(
        &self,
        table: Table,
        column: &str,
        value: &Value,
    ) -> Result<Option<Value>, StoreError>;

    /// `select * from {table}` in whatever order the store yields.
    async fn select_all(&self, table: Table) -> Result<Vec<Value>, StoreError>;

    /// Inserts one row and returns the row(s) as stored, ids included.
    async fn insert(&self, table: Table, row: Value) -> Result<Vec<Value>, StoreError>;

    /// `delete from {table} where {column} = {value}`, returning removed rows.
    async fn delete(
        &self,
        table: Table,
        column: &str,
        value: &Value,
    ) -> Result<Vec<Value>, StoreError>;
}

// ============================================================================
// RESPONSE NORMALISATION
// ============================================================================

/// Pulls an error out of a raw store response, if it carries one.
///
/// Non-success statuses are always errors. A success status with an
/// error-shaped object (`message` plus `code`, or a nested `error`) is too.
pub fn extract_error(status: u16, body: &Value) -> Option<StoreError> {
    let success = (200..300).contains(&status);

    if let Some(inner) = body.get("error").filter(|e| !e.is_null()) {
        return Some(StoreError::Rejected {
            status,
            message: error_message(inner),
        });
    }

    let error_shaped = body.get("message").is_some() && body.get("code").is_some();
    if success && !error_shaped {
        return None;
    }

    Some(StoreError::Rejected {
        status,
        message: error_message(body),
    })
}

/// Pulls the row list out of a raw store response.
///
/// Accepts a bare array, a `{"data": ...}` envelope, or a single row object.
pub fn extract_data(body: Value) -> Vec<Value> {
    match body {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => extract_data(data),
            None if map.is_empty() => Vec::new(),
            None => vec![Value::Object(map)],
        },
        _ => Vec::new(),
    }
}

fn error_message(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| body.to_string()),
        Value::Null => "empty response".to_owned(),
        other => other.to_string(),
    }
}

// ============================================================================
// TYPED HELPERS
// ============================================================================

pub fn decode_row<T: DeserializeOwned>(table: Table, row: Value) -> Result<T, StoreError> {
    serde_json::from_value(row)
        .map_err(|e| StoreError::Decode(format!("malformed {table} row: {e}")))
}

pub async fn get_one<T: DeserializeOwned>(
    store: &dyn DataStore,
    table: Table,
    column: &str,
    value: impl Into<Value>,
) -> Result<Option<T>, StoreError> {
    store
        .select_one(table, column, &value.into())
        .await?
        .map(|row| decode_row(table, row))
        .transpose()
}

pub async fn get_all<T: DeserializeOwned>(
    store: &dyn DataStore,
    table: Table,
) -> Result<Vec<T>, StoreError> {
    store
        .select_all(table)
        .await?
        .into_iter()
        .map(|row| decode_row(table, row))
        .collect()
}

/// Inserts `row` and decodes the first row the store hands back.
pub async fn insert_one<N: Serialize, T: DeserializeOwned>(
    store: &dyn DataStore,
    table: Table,
    row: &N,
) -> Result<T, StoreError> {
    let row = serde_json::to_value(row)
        .map_err(|e| StoreError::Decode(format!("unserializable {table} row: {e}")))?;

    let created = store
        .insert(table, row)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Decode(format!("insert into {table} returned no row")))?;

    decode_row(table, created)
}

pub async fn delete_where(
    store: &dyn DataStore,
    table: Table,
    column: &str,
    value: impl Into<Value>,
) -> Result<(), StoreError> {
    store.delete(table, column, &value.into()).await.map(|_| ())
}
