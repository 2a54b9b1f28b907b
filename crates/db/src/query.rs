//! Query builder for `/rest/v1/{table}` requests.
//!
//! Filters are encoded the PostgREST way (`col=eq.value`,
//! `col=in.(a,b)`, `col=fts.query`, `order=col.desc`). Writes ask for
//! `Prefer: return=representation` so the affected rows come back.

use std::fmt::Display;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use worldweaver_core::search::SortOrder;

use crate::client::{parse_response, ServiceConn, ServiceError};

const RETURN_REPRESENTATION: &str = "return=representation";

/// A pending request against one table.
#[derive(Debug, Clone)]
pub struct TableQuery<'a> {
    conn: ServiceConn<'a>,
    table: &'static str,
    params: Vec<(String, String)>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(conn: ServiceConn<'a>, table: &'static str) -> Self {
        Self {
            conn,
            table,
            params: Vec::new(),
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// The encoded query string pairs, in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.params
    }

    fn param(mut self, key: &str, value: String) -> Self {
        self.params.push((key.to_string(), value));
        self
    }

    // ---- filters and modifiers ----

    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns.to_string())
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{value}"))
    }

    pub fn is_null(self, column: &str) -> Self {
        self.param(column, "is.null".to_string())
    }

    pub fn in_<T: Display>(self, column: &str, values: &[T]) -> Self {
        let list = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.param(column, format!("in.({list})"))
    }

    /// Full-text match; `tsquery` must already be in `to_tsquery` syntax.
    pub fn fts(self, column: &str, tsquery: &str) -> Self {
        self.param(column, format!("fts.{tsquery}"))
    }

    /// Append a sort key. Repeated calls sort by each key in turn.
    pub fn order(mut self, column: &str, order: SortOrder) -> Self {
        let key = format!("{column}.{}", order.as_str());
        match self.params.iter_mut().find(|(k, _)| k == "order") {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&key);
            }
            None => self.params.push(("order".into(), key)),
        }
        self
    }

    pub fn limit(self, limit: u64) -> Self {
        self.param("limit", limit.to_string())
    }

    pub fn offset(self, offset: u64) -> Self {
        self.param("offset", offset.to_string())
    }

    // ---- reads ----

    pub async fn fetch_all<T: DeserializeOwned>(self) -> Result<Vec<T>, ServiceError> {
        let response = self
            .conn
            .request(Method::GET, self.table)
            .query(&self.params)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, ServiceError> {
        let rows: Vec<T> = self.limit(1).fetch_all().await?;
        Ok(rows.into_iter().next())
    }

    /// Fetch one page plus the total row count of the filtered set.
    pub async fn fetch_counted<T: DeserializeOwned>(self) -> Result<(Vec<T>, u64), ServiceError> {
        let response = self
            .conn
            .request(Method::GET, self.table)
            .query(&self.params)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = crate::client::ensure_success(response).await?;
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_total);
        let rows: Vec<T> = response.json().await?;
        let total = total.unwrap_or(rows.len() as u64);
        Ok((rows, total))
    }

    /// Count the filtered rows without fetching them (`HEAD` with
    /// `Prefer: count=exact`).
    pub async fn count(self) -> Result<u64, ServiceError> {
        let table = self.table;
        let response = self
            .conn
            .request(Method::HEAD, self.table)
            .query(&self.params)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = crate::client::ensure_success(response).await?;
        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_total)
            .ok_or(ServiceError::MissingCount { table })
    }

    // ---- writes ----

    /// Insert one row and return it as stored.
    pub async fn insert<B, T>(self, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let table = self.table;
        let rows: Vec<T> = self.write(Method::POST, body, RETURN_REPRESENTATION).await?;
        rows.into_iter()
            .next()
            .ok_or(ServiceError::MissingRow { table })
    }

    /// Insert or merge rows keyed on the `on_conflict` columns.
    pub async fn upsert<B, T>(self, body: &B, on_conflict: &str) -> Result<Vec<T>, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.param("on_conflict", on_conflict.to_string())
            .write(
                Method::POST,
                body,
                "return=representation,resolution=merge-duplicates",
            )
            .await
    }

    /// Patch the filtered rows. Returns `None` when nothing matched.
    pub async fn update<B, T>(self, body: &B) -> Result<Option<T>, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self.write(Method::PATCH, body, RETURN_REPRESENTATION).await?;
        Ok(rows.into_iter().next())
    }

    /// Delete the filtered rows. Returns `true` if any row was removed.
    pub async fn delete(self) -> Result<bool, ServiceError> {
        let response = self
            .conn
            .request(Method::DELETE, self.table)
            .query(&self.params)
            .header("Prefer", RETURN_REPRESENTATION)
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = parse_response(response).await?;
        Ok(!rows.is_empty())
    }

    async fn write<B, T>(self, method: Method, body: &B, prefer: &str) -> Result<Vec<T>, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .conn
            .request(method, self.table)
            .query(&self.params)
            .header("Prefer", prefer)
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }
}

/// Total from a `Content-Range` header such as `0-19/57` or `*/0`.
pub fn parse_total(content_range: &str) -> Option<u64> {
    content_range.rsplit_once('/')?.1.parse().ok()
}
