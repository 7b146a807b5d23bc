//! HTTP layer shared by the DNS provider adapters and the IP source.
//!
//! This module provides:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod request;


pub use client::{REQUEST_TIMEOUT, ReqwestClient};
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};

/// Mock HTTP client for testing.
///
/// Allows tests to script responses and inspect every request sent.
#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

    /// A mock implementation of [`HttpClient`] that replays queued
    /// responses and records each request it receives.
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        /// Creates a mock with no scripted responses.
        ///
        /// Any request against it fails with [`HttpError::Timeout`].
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a response to be returned by the next unanswered request.
        pub fn push_response(&self, response: HttpResponse) {
            self.responses.lock().unwrap().push_back(Ok(response));
        }

        /// Queues a status-only response with the given JSON body.
        pub fn push_json(&self, status: http::StatusCode, body: &str) {
            self.push_response(HttpResponse::new(
                status,
                http::HeaderMap::new(),
                body.as_bytes().to_vec(),
            ));
        }

        /// Queues a status-only response with an empty body.
        pub fn push_status(&self, status: http::StatusCode) {
            self.push_response(HttpResponse::new(status, http::HeaderMap::new(), Vec::new()));
        }

        /// Queues an error to be returned by the next unanswered request.
        pub fn push_error(&self, error: HttpError) {
            self.responses.lock().unwrap().push_back(Err(error));
        }

        /// Returns all requests received so far.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Returns the number of requests received so far.
        #[must_use]
        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl HttpClient for MockHttpClient {
        async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push(req);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                // An exhausted script behaves like an unreachable server
                .unwrap_or(Err(HttpError::Timeout))
        }
    }
}
