//! HTTP backend implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use crate::{Backend, Method, Request, Response, TransportError};

/// A [`Backend`] that talks to the API over HTTP.
///
/// The inner client keeps a cookie store, so the HTTP-only refresh cookie
/// the server sets on login is sent back on every later request
/// (including `/api/auth/refresh`).
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` with a cookie-enabled client.
    ///
    /// # Errors
    /// Returns [`TransportError::ConnectionFailed`] if the TLS backend
    /// cannot be initialized.
    pub fn new(base_url: Url) -> Result<Self, TransportError> {
        Self::build(base_url, None)
    }

    /// Same as [`new`](Self::new), with a per-request timeout.
    ///
    /// # Errors
    /// Returns [`TransportError::ConnectionFailed`] if the client cannot be built.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        Self::build(base_url, Some(timeout))
    }

    /// Uses a caller-supplied client (for connection pool reuse).
    ///
    /// The caller is responsible for enabling the cookie store on it.
    pub fn with_http_client(base_url: Url, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    fn build(base_url: Url, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        Ok(Self { base_url, http })
    }

    /// The base URL all request paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `request.path` to the base URL's path, so a base of
    /// `https://host/backend` sends `/api/me` to `https://host/backend/api/me`.
    fn url_for(&self, request: &Request) -> Result<Url, TransportError> {
        if self.base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(self.base_url.to_string()));
        }
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        let path = request.path.trim_start_matches('/');
        url.set_path(&format!("{prefix}/{path}"));
        url.set_query(None);
        url.set_fragment(None);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

impl Backend for HttpBackend {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.url_for(&request)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut builder = self.http.request(method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_vec();

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status,
            "backend responded"
        );

        Ok(Response { status, body, json })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::ConnectionFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpBackend {
        HttpBackend::new("http://localhost:8000".parse().unwrap()).unwrap()
    }

    #[test]
    fn test_url_for_joins_path_onto_base() {
        let url = backend().url_for(&Request::get("/api/me")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/me");
    }

    #[test]
    fn test_url_for_keeps_base_path_prefix() {
        let backend = HttpBackend::new("https://aura.example/backend".parse().unwrap()).unwrap();
        let url = backend.url_for(&Request::get("/api/me")).unwrap();
        assert_eq!(url.as_str(), "https://aura.example/backend/api/me");
    }

    #[test]
    fn test_url_for_base_with_trailing_slash_has_single_separator() {
        let backend = HttpBackend::new("https://aura.example/backend/".parse().unwrap()).unwrap();
        let url = backend
            .url_for(&Request::get("/api/generate").with_query("mode", "fact"))
            .unwrap();
        assert_eq!(url.as_str(), "https://aura.example/backend/api/generate?mode=fact");
    }

    #[test]
    fn test_url_for_encodes_query_pairs() {
        let req = Request::get("/api/generate")
            .with_query("mode", "fact")
            .with_query("player", "Bukayo Saka");
        let url = backend().url_for(&req).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/generate?mode=fact&player=Bukayo+Saka"
        );
    }

    #[test]
    fn test_url_for_path_with_id_segment() {
        let url = backend()
            .url_for(&Request::post("/api/predictions/7/check", b"{}".to_vec()))
            .unwrap();
        assert_eq!(url.path(), "/api/predictions/7/check");
    }
}
