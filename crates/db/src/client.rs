//! HTTP client for the hosted data service.
//!
//! Wraps the PostgREST-style REST surface (`/rest/v1/{table}`,
//! `/rest/v1/rpc/{name}`) using [`reqwest`]. Every request carries the
//! project's anon key and the caller's session token, so the service's
//! row-level policies decide what each user may read or write.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::query::TableQuery;

/// Errors from the hosted service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Hosted service error ({status}): {message}")]
    Api {
        status: u16,
        /// Postgres SQLSTATE or PostgREST `PGRST*` code, when present.
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// A write that should have returned a row returned none.
    #[error("No row returned from {table}")]
    MissingRow { table: &'static str },

    /// A count request came back without a `Content-Range` total.
    #[error("No row count returned from {table}")]
    MissingCount { table: &'static str },
}

impl ServiceError {
    /// The service's error code, if it sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body the service sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Shared client for one hosted project. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HostedClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl HostedClient {
    /// * `base_url` - Project URL, e.g. `https://abc.example.co`.
    /// * `anon_key` - Public API key sent as the `apikey` header.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, anon_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            anon_key: anon_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind the client to one caller's session token.
    pub fn as_user<'a>(&'a self, token: &'a str) -> ServiceConn<'a> {
        ServiceConn {
            client: self,
            token,
        }
    }

    /// Verify the REST endpoint is reachable with the configured key.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let response = self
            .http
            .get(format!("{}/rest/v1/", self.base_url))
            .header("apikey", &self.anon_key)
            .send()
            .await?;
        check_status(response).await
    }
}

/// A [`HostedClient`] acting on behalf of one authenticated user.
#[derive(Debug, Clone, Copy)]
pub struct ServiceConn<'a> {
    client: &'a HostedClient,
    token: &'a str,
}

impl<'a> ServiceConn<'a> {
    /// Start a query against `table`.
    pub fn table(&self, table: &'static str) -> TableQuery<'a> {
        TableQuery::new(*self, table)
    }

    /// Call a stored procedure and decode its JSON result.
    pub async fn rpc<A, T>(&self, name: &str, args: &A) -> Result<T, ServiceError>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, &format!("rpc/{name}"))
            .json(args)
            .send()
            .await?;
        parse_response(response).await
    }

    /// A request to `/rest/v1/{path}` with both auth headers set.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .http
            .request(method, format!("{}/rest/v1/{}", self.client.base_url, path))
            .header("apikey", &self.client.anon_key)
            .bearer_auth(self.token)
    }
}

// ---- response helpers ----

/// Return the response unchanged on success, or decode the service's error
/// body into [`ServiceError::Api`].
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    let body: Option<ErrorBody> = serde_json::from_str(&text).ok();

    let err = match body {
        Some(body) => ServiceError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body.message.unwrap_or(text),
            details: body.details,
            hint: body.hint,
        },
        None => ServiceError::Api {
            status: status.as_u16(),
            code: None,
            message: text,
            details: None,
            hint: None,
        },
    };
    tracing::debug!(error = %err, "Hosted service returned an error");
    Err(err)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}

/// Assert the response has a success status code, discarding the body.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), ServiceError> {
    ensure_success(response).await?;
    Ok(())
}
