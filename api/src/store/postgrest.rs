//! Client for the hosted Data Store's REST interface (PostgREST dialect).

use super::{DataStore, StoreError, Table, extract_data, extract_error};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};
use serde_json::Value;

const PREFER_REPRESENTATION: &str = "return=representation";

pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// `base_url` is the project URL, e.g. `https://abc.supabase.co`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json")
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<Value>, StoreError> {
        let response = self.authorized(request).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        if let Some(err) = extract_error(status, &body) {
            return Err(err);
        }

        Ok(extract_data(body))
    }
}

/// Renders `value` as a PostgREST equality filter, `eq.<value>`.
fn eq_filter(value: &Value) -> String {
    match value {
        Value::String(s) => format!("eq.{s}"),
        other => format!("eq.{other}"),
    }
}

#[async_trait]
impl DataStore for PostgrestStore {
    async fn select_one(
        &self,
        table: Table,
        column: &str,
        value: &Value,
    ) -> Result<Option<Value>, StoreError> {
        let request = self.client.get(self.table_url(table)).query(&[
            ("select", "*".to_owned()),
            (column, eq_filter(value)),
            ("limit", "1".to_owned()),
        ]);

        Ok(self.execute(request).await?.into_iter().next())
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Value>, StoreError> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*")]);

        self.execute(request).await
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Vec<Value>, StoreError> {
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&row);

        self.execute(request).await
    }

    async fn delete(
        &self,
        table: Table,
        column: &str,
        value: &Value,
    ) -> Result<Vec<Value>, StoreError> {
        let request = self
            .client
            .delete(self.table_url(table))
            .header("Prefer", PREFER_REPRESENTATION)
            .query(&[(column, eq_filter(value))]);

        self.execute(request).await
    }
}
