use super::{DataStore, StoreError, Table};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

/// In-process store for local development and tests.
///
/// `DashMap` gives us one lock per table, so handlers running on different
/// worker threads can hit it concurrently. Ids are sequential per table,
/// starting at 1, and `select_all` yields rows in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: DashMap<Table, MemoryTable>,
}

#[derive(Default)]
struct MemoryTable {
    last_id: i64,
    rows: Vec<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(row: &Value, column: &str, value: &Value) -> bool {
    row.get(column) == Some(value)
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn select_one(
        &self,
        table: Table,
        column: &str,
        value: &Value,
    ) -> Result<Option<Value>, StoreError> {
        Ok(self.tables.get(&table).and_then(|t| {
            t.rows
                .iter()
                .find(|row| matches(row, column, value))
                .cloned()
        }))
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .tables
            .get(&table)
            .map(|t| t.rows.clone())
            .unwrap_or_default())
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Vec<Value>, StoreError> {
        let Value::Object(mut fields) = row else {
            return Err(StoreError::Decode(format!(
                "rows inserted into {table} must be JSON objects"
            )));
        };

        let mut entry = self.tables.entry(table).or_default();
        entry.last_id += 1;
        fields.insert("id".to_owned(), Value::from(entry.last_id));

        let stored = Value::Object(fields);
        entry.rows.push(stored.clone());

        Ok(vec![stored])
    }

    async fn delete(
        &self,
        table: Table,
        column: &str,
        value: &Value,
    ) -> Result<Vec<Value>, StoreError> {
        let Some(mut entry) = self.tables.get_mut(&table) else {
            return Ok(Vec::new());
        };

        let (removed, kept): (Vec<Value>, Vec<Value>) = std::mem::take(&mut entry.rows)
            .into_iter()
            .partition(|row| matches(row, column, value));
        entry.rows = kept;

        Ok(removed)
    }
}
