//! Recording HTTP client for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock HTTP client that returns queued responses and records requests.
///
/// Once the queue is exhausted every request gets `200 {}`.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    /// Queues `responses` in order.
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues one `200` response per JSON value.
    pub fn with_json(pages: Vec<Value>) -> Self {
        Self::new(
            pages
                .into_iter()
                .map(|page| Ok(HttpResponse::ok(page.to_string().into_bytes())))
                .collect(),
        )
    }

    /// Returns every request received so far.
    pub fn captured(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::ok(b"{}".to_vec())))
    }
}

impl HttpClient for &MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}
