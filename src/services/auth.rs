// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication endpoints. Successful sign-ins store the returned token
//! in the session.

use crate::error::Result;
use crate::models::{AuthResponse, Registration, User};
use crate::services::ApiClient;
use serde_json::json;

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        let response = self.client.post("/auth/register", registration).await?;
        self.store_token(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = json!({ "email": email, "password": password });
        let response = self.client.post("/auth/login", &body).await?;
        self.store_token(response)
    }

    pub async fn send_otp(&self, email: &str) -> Result<serde_json::Value> {
        self.client
            .post("/auth/send-otp", &json!({ "email": email }))
            .await
    }

    pub async fn send_mobile_otp(&self, phone: &str) -> Result<serde_json::Value> {
        self.client
            .post("/auth/send-mobile-otp", &json!({ "phone": phone }))
            .await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthResponse> {
        let body = json!({ "email": email, "otp": otp });
        let response = self.client.post("/auth/verify-otp", &body).await?;
        self.store_token(response)
    }

    pub async fn verify_mobile_otp(&self, phone: &str, otp: &str) -> Result<AuthResponse> {
        let body = json!({ "phone": phone, "otp": otp });
        let response = self.client.post("/auth/verify-mobile-otp", &body).await?;
        self.store_token(response)
    }

    pub async fn current_user(&self) -> Result<User> {
        self.client.get("/auth/me").await
    }

    /// Sign out locally; the backend keeps no session to revoke.
    pub fn logout(&self) -> Result<()> {
        self.client.session().clear()
    }

    fn store_token(&self, response: AuthResponse) -> Result<AuthResponse> {
        if let Some(token) = response.access_token.as_deref().filter(|t| !t.is_empty()) {
            self.client.session().set_token(token)?;
            tracing::info!("Access token stored");
        }
        Ok(response)
    }
}
