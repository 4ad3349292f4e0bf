use std::rc::Rc;

use admin_dashboard_client::{
    Api, ClientConfig, HttpClient, HttpRequest, HttpResponse, Method, Transport, TransportError,
};
use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder};

use super::token_storage::LocalTokenStore;

/// Sends requests with the browser's fetch API
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = builder_for(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| TransportError(format!("Failed to build request: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        // An unreadable body is treated as empty so the status still decides the outcome
        let body = response.text().await.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    api: Api,
}

impl ApiClient {
    /// Fetch transport plus the browser's local storage for the session token
    pub fn new(config: ClientConfig) -> Self {
        let http = HttpClient::new(config, Rc::new(GlooTransport), Rc::new(LocalTokenStore));
        Self { api: Api::new(http) }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl std::ops::Deref for ApiClient {
    type Target = Api;

    fn deref(&self) -> &Api {
        &self.api
    }
}
