//! HTTP client adapter.
//!
//! Builds JSON requests against the configured backend, attaches the bearer
//! token from the injected [`TokenStore`] and turns every failure into an
//! [`ApiError`] whose message is ready to show to the user.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ApiError;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::session::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully built request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never got an HTTP response (offline, CORS, DNS...)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Moves an [`HttpRequest`] over the wire. The UI is single threaded, so
/// implementations need not be `Send`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpClient {
    config: Rc<ClientConfig>,
    transport: Rc<dyn Transport>,
    tokens: Rc<dyn TokenStore>,
}

impl HttpClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            tokens,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<R, ApiError> {
        self.send(Method::Get, path, None, fallback).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<R, ApiError> {
        self.send(Method::Delete, path, None, fallback).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B, fallback: &str) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::Post, path, Some(body), fallback).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B, fallback: &str) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::Put, path, Some(body), fallback).await
    }

    /// Send `body` as JSON and decode the JSON answer.
    ///
    /// Non-2xx answers fail with the body's `message`/`error` text or with
    /// `fallback`; network failures and undecodable answers use `fallback`.
    pub async fn request<B, R>(&self, method: Method, path: &str, body: Option<&B>, fallback: &str) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| {
                error!("Failed to serialize {} {} body: {}", method, path, e);
                ApiError::validation(fallback)
            })?;
        self.send(method, path, body, fallback).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        fallback: &str,
    ) -> Result<R, ApiError> {
        let request = self.build(method, path, body);
        debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await.map_err(|e| {
            warn!("{} {} failed before a response: {}", method, path, e);
            ApiError::network(fallback)
        })?;

        if !response.ok() {
            let error = ApiError::from_response(response.status, &response.body, fallback);
            warn!("{} {} rejected with {}: {}", method, path, response.status, error);
            return Err(error);
        }

        // Empty bodies (204, bare 200) decode like an empty object
        let text = if response.body.trim().is_empty() { "{}" } else { response.body.as_str() };
        serde_json::from_str(text).map_err(|e| {
            error!("Unexpected response body for {} {}: {}", method, path, e);
            ApiError::decode(fallback)
        })
    }

    fn build(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.tokens.get_token().filter(|token| !token.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        HttpRequest {
            method,
            url: self.config.url(path),
            headers,
            body,
        }
    }
}
