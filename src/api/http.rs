//! Transport-level request/response values and the client seam.

use std::borrow::Cow;

use super::HttpError;

/// A buffered HTTP request.
///
/// Built by [`super::LinodeClient`] and handed to whatever [`HttpClient`]
/// it was constructed with.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Method; the Linode client only issues GET and PUT
    pub method: http::Method,
    /// Absolute URL, query string included
    pub url: url::Url,
    /// Headers, repeated names allowed
    pub headers: http::HeaderMap,
    /// Body bytes for PUT
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    fn bare(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// A body-less GET.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::bare(http::Method::GET, url)
    }

    /// A PUT carrying `body` serialized as compact JSON.
    #[must_use]
    pub fn put_json(url: url::Url, body: &serde_json::Value) -> Self {
        let mut request = Self::bare(http::Method::PUT, url);
        request.body = Some(body.to_string().into_bytes());
        request
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Appends `params` to the query string.
    #[must_use]
    pub fn with_query(mut self, params: &[(String, String)]) -> Self {
        if !params.is_empty() {
            self.url.query_pairs_mut().extend_pairs(params);
        }
        self
    }

    /// Last non-empty segment of the URL path (`domains`, `records`, `3`).
    ///
    /// Replay tables are keyed by this.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or_default()
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Assembles a response from its parts.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A `200 OK` with `body` and no headers.
    #[must_use]
    pub fn ok(body: Vec<u8>) -> Self {
        Self::new(http::StatusCode::OK, http::HeaderMap::new(), body)
    }

    /// True for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// True when the body holds nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// The body as text, invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Sends one [`HttpRequest`] and buffers the reply.
///
/// Implemented by [`super::ReqwestClient`] for the network and by
/// [`super::ReplayClient`] for canned runs; tests add their own recorders.
///
/// ```ignore
/// use linode_ddns::api::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Fixed(HttpResponse);
///
/// impl HttpClient for Fixed {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends `req`.
    ///
    /// Any status comes back as `Ok`; deciding what a 4xx or 5xx means is
    /// up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response was obtained: connection
    /// failure, timeout, unusable URL, or a replay table without an entry.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
