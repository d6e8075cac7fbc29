// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transport helper for the REST backend.
//!
//! Handles:
//! - Bearer token injection from the session
//! - JSON request/response bodies
//! - Mapping non-2xx responses to the backend's `detail` message
//!
//! No retries and no timeout beyond the HTTP client's defaults.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::session::Session;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Authenticated JSON client for the backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<Session>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)).await
    }

    /// GET with query string.
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Backend health endpoint.
    pub async fn health(&self) -> Result<serde_json::Value> {
        self.get("/health").await
    }

    /// Fetch the server root (the base URL without its `/api` suffix) to
    /// check that the backend is reachable at all.
    pub async fn ping_root(&self) -> Result<serde_json::Value> {
        let root = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url);
        let url = format!("{}/", root);
        tracing::debug!(url = %url, "Pinging backend root");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        check_response_json(response).await
    }

    /// Build a request with the JSON content type and bearer token (if any).
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "API request");

        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "API request failed");
            AppError::Network(e.to_string())
        })?;
        check_response_json(response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let url = response.url().path().to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        tracing::warn!(status = status.as_u16(), path = %url, detail = %detail, "API error");
        return Err(AppError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    // Treat an empty body like JSON `null` so `Option<T>` targets work.
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes[..]
    };

    let parsed = serde_json::from_slice(body)
        .map_err(|e| AppError::Decode(format!("{}: {}", url, e)))?;
    tracing::debug!(path = %url, "API success");
    Ok(parsed)
}

/// Extract the backend's `detail` field from an error body.
///
/// FastAPI validation errors carry a structured `detail`; those are
/// rendered as JSON text.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
