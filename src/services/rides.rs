// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-off ride endpoints, including join requests and history.

use crate::error::Result;
use crate::models::ride::DEFAULT_REQUEST_MESSAGE;
use crate::models::{
    NewRide, Ride, RideHistoryEntry, RidePatch, RideRequest, RideRequestStatus, RideRole,
};
use crate::services::ApiClient;
use serde_json::json;

#[derive(Clone)]
pub struct RidesApi {
    client: ApiClient,
}

impl RidesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, limit: u32) -> Result<Vec<Ride>> {
        let rides: Option<Vec<Ride>> = self
            .client
            .get_query("/rides/", &[("limit", limit)])
            .await?;
        Ok(rides.unwrap_or_default())
    }

    pub async fn create(&self, ride: &NewRide) -> Result<Ride> {
        self.client.post("/rides/", ride).await
    }

    pub async fn my_rides(&self) -> Result<Vec<Ride>> {
        let rides: Option<Vec<Ride>> = self.client.get("/rides/my-rides").await?;
        Ok(rides.unwrap_or_default())
    }

    pub async fn details(&self, ride_id: i64) -> Result<Ride> {
        self.client.get(&format!("/rides/{}", ride_id)).await
    }

    pub async fn update(&self, ride_id: i64, patch: &RidePatch) -> Result<Ride> {
        self.client.put(&format!("/rides/{}", ride_id), patch).await
    }

    /// Ask to join a ride. Seat counts are only changed by the backend, on
    /// acceptance.
    pub async fn request(&self, ride_id: i64, message: Option<&str>) -> Result<RideRequest> {
        let body = json!({
            "ride_id": ride_id,
            "message": message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(DEFAULT_REQUEST_MESSAGE),
        });
        self.client.post("/rides/request", &body).await
    }

    /// Pending requests on one of the caller's rides.
    pub async fn requests_for_ride(&self, ride_id: i64) -> Result<Vec<RideRequest>> {
        let requests: Option<Vec<RideRequest>> = self
            .client
            .get(&format!("/rides/{}/requests", ride_id))
            .await?;
        Ok(requests.unwrap_or_default())
    }

    pub async fn respond_to_request(
        &self,
        request_id: i64,
        status: RideRequestStatus,
    ) -> Result<RideRequest> {
        self.client
            .put(
                &format!("/rides/requests/{}", request_id),
                &json!({ "status": status }),
            )
            .await
    }

    pub async fn my_requests(&self) -> Result<Vec<RideRequest>> {
        let requests: Option<Vec<RideRequest>> = self.client.get("/rides/my-requests").await?;
        Ok(requests.unwrap_or_default())
    }

    pub async fn history(&self) -> Result<Vec<RideHistoryEntry>> {
        let history: Option<Vec<RideHistoryEntry>> = self.client.get("/rides/history").await?;
        Ok(history.unwrap_or_default())
    }

    pub async fn record_history(
        &self,
        user_id: i64,
        ride_id: i64,
        role: RideRole,
    ) -> Result<RideHistoryEntry> {
        let body = json!({ "user_id": user_id, "ride_id": ride_id, "role": role });
        self.client.post("/rides/history", &body).await
    }
}
