//! Transport abstraction layer for Arsenal Aura.
//!
//! Provides the [`Backend`] trait that abstracts over how requests reach
//! the remote API, plus the [`Request`]/[`Response`] pair that travels
//! across it. Everything above this crate speaks in typed endpoints; this
//! crate only knows methods, paths, bytes, and an optional bearer.
//!
//! # Feature Flags
//!
//! - `http` (default): real HTTP backend via `reqwest`, with a cookie
//!   store so the server's refresh cookie rides along on every call
//! - `mock`: [`mock::ScriptedBackend`], a canned-response backend for tests

mod error;
#[cfg(feature = "http")]
mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod retry;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpBackend;
pub use retry::RetryPolicy;

use std::fmt;
use std::future::Future;

/// HTTP verbs the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Patch => write!(f, "PATCH"),
        }
    }
}

/// A single outgoing API request.
///
/// `path` is relative to the backend's base URL (e.g. `/api/me`).
/// `query` pairs are appended URL-encoded by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub bearer: Option<String>,
}

impl Request {
    /// Creates a body-less `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    /// Creates a `POST` request carrying an already-encoded body.
    pub fn post(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self::new(Method::Post, path, Some(body))
    }

    /// Creates a `PATCH` request carrying an already-encoded body.
    pub fn patch(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self::new(Method::Patch, path, Some(body))
    }

    fn new(method: Method, path: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
            bearer: None,
        }
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attaches a bearer credential (`Authorization: Bearer <token>`).
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// The raw answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
    /// `true` when the server labelled the body `application/json`.
    pub json: bool,
}

impl Response {
    /// Builds a JSON response from a status and body text.
    pub fn json(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            json: true,
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the remote API.
///
/// The only I/O seam in the workspace: the session manager and the
/// predictor never touch the network directly, they go through an
/// implementation of this trait. Production uses [`HttpBackend`]; tests
/// plug in a scripted backend.
pub trait Backend: Send + Sync + 'static {
    /// Sends one request and waits for the response.
    ///
    /// A non-2xx status is NOT an error at this layer; only failures to
    /// get any answer at all (connect, timeout, unreadable body) are.
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}
