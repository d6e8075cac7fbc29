// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved location endpoints.

use crate::error::Result;
use crate::models::{Location, NewLocation};
use crate::services::ApiClient;

#[derive(Clone)]
pub struct LocationsApi {
    client: ApiClient,
}

impl LocationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Location>> {
        let locations: Option<Vec<Location>> = self.client.get("/locations/").await?;
        Ok(locations.unwrap_or_default())
    }

    pub async fn create(&self, location: &NewLocation) -> Result<Location> {
        self.client.post("/locations/", location).await
    }
}
