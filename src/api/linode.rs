//! Authenticated client for the Linode v4 REST API.

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde_json::{Map, Value};
use url::Url;

use super::{ApiError, Domain, HttpClient, HttpRequest, Record};
use crate::config::{CommitMode, defaults};

/// What happened to a PUT request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    /// The request was sent and accepted.
    Sent,
    /// The request was not sent; `notice` describes it.
    Simulated {
        /// Human-readable description of the skipped request
        notice: String,
    },
}

/// Linode API client bound to one token.
///
/// GETs always go out. PUTs go out only in [`CommitMode::Commit`]; in
/// [`CommitMode::Simulate`] they are described instead.
///
/// # Example
///
/// ```no_run
/// use linode_ddns::api::{LinodeClient, ReqwestClient};
/// use linode_ddns::config::CommitMode;
///
/// # async fn example() -> Result<(), linode_ddns::api::ApiError> {
/// let client = LinodeClient::new(ReqwestClient::new(), "token", CommitMode::Simulate)?;
/// for domain in client.domains().await? {
///     println!("{} {}", domain.id, domain.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LinodeClient<H> {
    http: H,
    base_url: Url,
    authorization: HeaderValue,
    commit: CommitMode,
}

impl<H> LinodeClient<H> {
    /// Creates a client for the public API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidToken`] if the token cannot be sent as a header.
    pub fn new(http: H, token: &str, commit: CommitMode) -> Result<Self, ApiError> {
        let mut authorization =
            HeaderValue::try_from(format!("Bearer {token}")).map_err(ApiError::InvalidToken)?;
        authorization.set_sensitive(true);
        let base_url = Url::parse(defaults::API_BASE_URL).map_err(|source| ApiError::Endpoint {
            path: defaults::API_BASE_URL.to_string(),
            source,
        })?;

        Ok(Self {
            http,
            base_url,
            authorization,
            commit,
        })
    }

    /// Points the client at another API root (for tests and proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns the underlying HTTP client.
    #[cfg(test)]
    #[must_use]
    pub const fn http(&self) -> &H {
        &self.http
    }

    /// Returns the commit mode fixed at construction.
    #[must_use]
    pub const fn commit_mode(&self) -> CommitMode {
        self.commit
    }

    /// Resolves `path` (relative, leading `/` optional) against the API root.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|source| ApiError::Endpoint {
            path: path.to_string(),
            source,
        })
    }

    fn authorized(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_header(AUTHORIZATION, self.authorization.clone())
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }
}

impl<H: HttpClient> LinodeClient<H> {
    /// Sends `request` and decodes the JSON body of a successful response.
    async fn send(&self, path: &str, request: HttpRequest) -> Result<Value, ApiError> {
        let response = self.http.request(self.authorized(request)).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: response.status,
                body: response.text().into_owned(),
            });
        }
        if response.is_blank() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&response.body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// GETs `path` with query `params` and returns the decoded JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or invalid JSON.
    pub async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value, ApiError> {
        let request = HttpRequest::get(self.endpoint(path)?).with_query(params);
        tracing::debug!("GET {}", request.url);
        self.send(path, request).await
    }

    /// PUTs `body` to `path`, or describes the request when simulating.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx status.
    pub async fn put(&self, path: &str, body: &Value) -> Result<PutOutcome, ApiError> {
        if !self.commit.is_commit() {
            return Ok(PutOutcome::Simulated {
                notice: format!("Would PUT {path} {body}"),
            });
        }

        let url = self.endpoint(path)?;
        tracing::debug!("PUT {url} {body}");
        let request = HttpRequest::put_json(url, body);
        self.send(path, request).await?;
        Ok(PutOutcome::Sent)
    }

    /// GETs every page of the listing at `path` and concatenates their `data`.
    ///
    /// Follows `page`/`pages` until the last page, a page without usable
    /// counters, or [`defaults::MAX_PAGES`] requests, whichever comes first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::QueryFailed`] as soon as a page is not an object
    /// or carries an error array; nothing collected so far is returned.
    pub async fn get_paginated(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Value>, ApiError> {
        let mut params = params.to_vec();
        let mut items = Vec::new();

        for _ in 0..defaults::MAX_PAGES {
            let mut page = match self.get(path, &params).await? {
                Value::Object(map) if !has_error_array(&map) => map,
                other => return Err(ApiError::QueryFailed(other.to_string())),
            };

            if let Some(Value::Array(data)) = page.remove("data") {
                items.extend(data);
            }

            let current = counter(&page, "page");
            let total = counter(&page, "pages");
            if current == 0 || total == 0 || current >= total {
                return Ok(items);
            }

            params.retain(|(key, _)| key != "page");
            params.push(("page".to_string(), (current + 1).to_string()));
        }

        tracing::debug!(
            "Stopped paginating {path} after {} pages",
            defaults::MAX_PAGES
        );
        Ok(items)
    }

    /// Lists every domain in the account, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails or an entry is malformed.
    pub async fn domains(&self) -> Result<Vec<Domain>, ApiError> {
        let mut domains = decode_all(self.get_paginated("domains", &[]).await?, "domain")?;
        domains.sort();
        Ok(domains)
    }

    /// Lists every record of `domain` in provider order.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails or an entry is malformed.
    pub async fn records(&self, domain: &Domain) -> Result<Vec<Record>, ApiError> {
        let path = format!("domains/{}/records", domain.id);
        decode_all(self.get_paginated(&path, &[]).await?, "record")
    }
}

fn has_error_array(page: &Map<String, Value>) -> bool {
    page.contains_key("errors") || page.contains_key("ERRORARRAY")
}

/// Reads a pagination counter; absent, zero or non-numeric all mean 0.
fn counter(page: &Map<String, Value>, key: &str) -> u64 {
    page.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn decode_all<T: serde::de::DeserializeOwned>(
    items: Vec<Value>,
    kind: &'static str,
) -> Result<Vec<T>, ApiError> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|source| ApiError::Item { kind, source }))
        .collect()
}
