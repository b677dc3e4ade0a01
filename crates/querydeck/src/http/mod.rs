//! [`Catalog`] implementation over the backend's HTTP API.
//!
//! | call              | request                          |
//! |-------------------|----------------------------------|
//! | `list_tables`     | `GET  {base}/tables`             |
//! | `list_columns`    | `GET  {base}/columns/{table}`    |
//! | `list_join_columns` | `GET {base}/joinColumns/{table}` |
//! | `execute_sql`     | `POST {base}/executeSQL` (raw text) |
//! | `execute_select`  | `POST {base}/select` (JSON)      |
//! | `execute_join`    | `POST {base}/join` (JSON)        |
//! | `bulk_insert`     | `POST {base}/1m`                 |


use crate::config::{Config, ConfigError};
use querydeck_core::{
    catalog::{Catalog, JoinRequest, SelectRequest},
    error::CatalogError,
};
use reqwest::{
    Url,
    blocking::{Client, RequestBuilder, Response},
    header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use tracing::debug;

///
/// HttpCatalog
///
/// Blocking client; each trait call is exactly one HTTP exchange with no
/// retries.
///

#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: Client,
    base: Url,
}

impl HttpCatalog {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let base = Url::parse(config.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("base_url: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "base_url cannot carry a path: '{base}'"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ConfigError::Invalid(format!("http client: {err}")))?;

        Ok(Self { client, base })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL extended by path segments. Each segment is percent-encoded,
    /// so table names containing `/` or spaces stay a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::transport(format!("'{}' cannot be a base url", self.base)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // ------------------------------------------------------------------
    // Exchange
    // ------------------------------------------------------------------

    fn send(request: RequestBuilder) -> Result<Response, CatalogError> {
        let response = request.send().map_err(map_reqwest)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        debug!(status = status.as_u16(), "backend rejected request");

        Err(CatalogError::status(status.as_u16(), status_message(status, &body)))
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, CatalogError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");

        decode(Self::send(self.client.get(url))?)
    }

    /// POST a query payload. A 2xx body that is not JSON comes back as a
    /// JSON string.
    fn post_tabular<B>(&self, segments: &[&str], body: &B) -> Result<serde_json::Value, CatalogError>
    where
        B: serde::Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "POST");

        let text = Self::send(self.client.post(url).json(body))?
            .text()
            .map_err(map_reqwest)?;

        Ok(serde_json::from_str(&text).unwrap_or_else(|err| {
            debug!(%err, bytes = text.len(), "non-json query reply");
            serde_json::Value::String(text)
        }))
    }
}

impl Catalog for HttpCatalog {
    fn list_tables(&self) -> Result<Vec<String>, CatalogError> {
        self.get_json(&["tables"])
    }

    fn list_columns(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        self.get_json(&["columns", table])
    }

    fn list_join_columns(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        self.get_json(&["joinColumns", table])
    }

    fn execute_sql(&self, sql: &str) -> Result<String, CatalogError> {
        let url = self.endpoint(&["executeSQL"])?;
        debug!(%url, bytes = sql.len(), "POST");

        // the backend reads the body as-is, whatever the declared type
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(sql.to_string());

        Self::send(request)?.text().map_err(map_reqwest)
    }

    fn execute_select(&self, request: &SelectRequest) -> Result<serde_json::Value, CatalogError> {
        self.post_tabular(&["select"], request)
    }

    fn execute_join(&self, request: &JoinRequest) -> Result<serde_json::Value, CatalogError> {
        self.post_tabular(&["join"], request)
    }

    fn bulk_insert(&self) -> Result<(), CatalogError> {
        let url = self.endpoint(&["1m"])?;
        debug!(%url, "POST");

        Self::send(self.client.post(url)).map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    let body = response.text().map_err(map_reqwest)?;

    serde_json::from_str(&body).map_err(|err| CatalogError::decode(err.to_string()))
}

fn map_reqwest(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::timeout(err.to_string())
    } else if err.is_decode() {
        CatalogError::decode(err.to_string())
    } else {
        CatalogError::transport(err.to_string())
    }
}

fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}
