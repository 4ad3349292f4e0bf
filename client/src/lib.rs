//! # Admin dashboard client
//!
//! Everything between a form and the backend that does not touch the DOM:
//!
//! - [`http::HttpClient`] sends requests over a pluggable [`http::Transport`],
//!   attaches the session token and normalizes failures into [`shared::ApiError`].
//! - [`actions`] holds one module per backend resource.
//! - [`store::Store`] tracks the request lifecycle of a resource collection.

pub mod actions;
pub mod config;
pub mod http;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::Api;
pub use config::ClientConfig;
pub use http::{HttpClient, HttpRequest, HttpResponse, Method, Transport, TransportError};
pub use session::{SessionTokens, TokenStore};
pub use store::{Collection, Patch, Store, Subscription};
