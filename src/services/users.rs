// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile and weekly schedule endpoints.

use crate::error::Result;
use crate::models::{ProfilePatch, ScheduleEntry, User};
use crate::services::ApiClient;

#[derive(Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Result<User> {
        self.client.get("/users/profile").await
    }

    pub async fn profile_by_id(&self, user_id: i64) -> Result<User> {
        self.client
            .get(&format!("/users/profile/{}", user_id))
            .await
    }

    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<User> {
        self.client.put("/users/profile", patch).await
    }

    /// Preference choices (music, smoking, ...). Shape is backend-defined.
    pub async fn preference_options(&self) -> Result<serde_json::Value> {
        self.client.get("/users/preferences/options").await
    }

    pub async fn schedule(&self) -> Result<Vec<ScheduleEntry>> {
        let entries: Option<Vec<ScheduleEntry>> = self.client.get("/users/schedule").await?;
        Ok(entries.unwrap_or_default())
    }

    pub async fn create_schedule(&self, entry: &ScheduleEntry) -> Result<ScheduleEntry> {
        self.client.post("/users/schedule", entry).await
    }
}
