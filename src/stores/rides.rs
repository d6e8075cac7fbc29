// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-off ride state: search results, own rides, join requests, history.

use crate::error::{AppError, Result};
use crate::models::{
    Car, NewRide, Ride, RideHistoryEntry, RidePatch, RideRequest, RideRequestStatus,
};
use crate::services::RidesApi;
use crate::stores::{upsert_by_id, HasStatus, LoadStatus, StateCell, StoreContext};
use crate::validation::{check_new_ride, check_ride_patch};

/// Default page size for ride search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default)]
pub struct RideState {
    pub rides: Vec<Ride>,
    pub my_rides: Vec<Ride>,
    /// Requests the signed-in rider has sent
    pub my_requests: Vec<RideRequest>,
    /// Requests received on the driver's ride last loaded
    pub incoming_requests: Vec<RideRequest>,
    pub ride_history: Vec<RideHistoryEntry>,
    pub status: LoadStatus,
}

impl HasStatus for RideState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct RideStore {
    ctx: StoreContext,
    api: RidesApi,
    state: StateCell<RideState>,
}

impl RideStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            api: RidesApi::new(ctx.client.clone()),
            ctx,
            state: StateCell::new(RideState::default()),
        }
    }

    pub fn snapshot(&self) -> RideState {
        self.state.read(|s| s.clone())
    }

    pub fn rides(&self) -> Vec<Ride> {
        self.state.read(|s| s.rides.clone())
    }

    pub fn my_rides(&self) -> Vec<Ride> {
        self.state.read(|s| s.my_rides.clone())
    }

    pub fn my_requests(&self) -> Vec<RideRequest> {
        self.state.read(|s| s.my_requests.clone())
    }

    pub fn incoming_requests(&self) -> Vec<RideRequest> {
        self.state.read(|s| s.incoming_requests.clone())
    }

    pub fn ride_history(&self) -> Vec<RideHistoryEntry> {
        self.state.read(|s| s.ride_history.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.read(|s| s.status.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.status.error.clone())
    }

    // ─── Reads ───────────────────────────────────────────────────

    pub async fn search_rides(&self, limit: u32) -> Result<Vec<Ride>> {
        self.state.begin();
        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.open_rides()),
            None => self.api.search(limit).await,
        };
        self.load_list(result, |s| &mut s.rides)
    }

    pub async fn get_my_rides(&self) -> Result<Vec<Ride>> {
        self.state.begin();
        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.my_rides()),
            None => self.api.my_rides().await,
        };
        self.load_list(result, |s| &mut s.my_rides)
    }

    pub async fn get_my_requests(&self) -> Result<Vec<RideRequest>> {
        self.state.begin();
        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.my_requests()),
            None => self.api.my_requests().await,
        };
        self.load_list(result, |s| &mut s.my_requests)
    }

    pub async fn get_ride_history(&self) -> Result<Vec<RideHistoryEntry>> {
        self.state.begin();
        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.ride_history()),
            None => self.api.history().await,
        };
        self.load_list(result, |s| &mut s.ride_history)
    }

    /// Pending requests on one of the driver's rides.
    pub async fn load_requests_for_ride(&self, ride_id: i64) -> Result<Vec<RideRequest>> {
        self.state.begin();
        let result = match &self.ctx.fixtures {
            Some(_) => Ok(Vec::new()),
            None => self.api.requests_for_ride(ride_id).await,
        };
        self.load_list(result, |s| &mut s.incoming_requests)
    }

    /// Fetch one ride; the lists are not touched.
    pub async fn get_ride_details(&self, ride_id: i64) -> Result<Ride> {
        self.state.begin();
        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.ride_details(ride_id)),
            None => self.api.details(ride_id).await,
        };
        match result {
            Ok(ride) => {
                self.state.finish();
                Ok(ride)
            }
            Err(e) => {
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    /// Settle a list fetch: on success replace the list, on failure clear it.
    fn load_list<T: Clone>(
        &self,
        result: Result<Vec<T>>,
        list: impl Fn(&mut RideState) -> &mut Vec<T>,
    ) -> Result<Vec<T>> {
        match result {
            Ok(items) => {
                self.state.update(|s| *list(s) = items.clone());
                self.state.finish();
                Ok(items)
            }
            Err(e) => {
                self.state.update(|s| list(s).clear());
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    // ─── Mutations ───────────────────────────────────────────────

    pub async fn create_ride(&self, data: &NewRide, car: Option<&Car>) -> Result<Ride> {
        self.state.begin();

        let result = match check_new_ride(data, car) {
            Ok(()) => self.api.create(data).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(ride) => {
                tracing::info!(id = ride.id, "Ride created");
                self.state
                    .update(|s| upsert_by_id(&mut s.my_rides, ride.clone(), |r| r.id));
                self.state.finish();
                self.ctx.notify_success("Ride created successfully!");
                Ok(ride)
            }
            Err(e) => Err(self.failed("Failed to create ride", e)),
        }
    }

    /// Apply a partial update. A new seat count is checked against the
    /// ride's car, fetching the ride when it is not cached.
    pub async fn update_ride(&self, ride_id: i64, patch: &RidePatch) -> Result<Ride> {
        self.state.begin();

        let result = match self.check_update(ride_id, patch).await {
            Ok(()) => self.api.update(ride_id, patch).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(updated) => {
                self.state.update(|s| {
                    if let Some(entry) = s.my_rides.iter_mut().find(|r| r.id == ride_id) {
                        *entry = updated.clone();
                    }
                });
                self.state.finish();
                self.ctx.notify_success("Ride updated successfully!");
                Ok(updated)
            }
            Err(e) => Err(self.failed("Failed to update ride", e)),
        }
    }

    /// Ask to join a driver's ride.
    ///
    /// Only the request is recorded; the ride's seat count is the backend's
    /// business and changes when the driver accepts.
    pub async fn request_ride(&self, ride_id: i64, message: Option<&str>) -> Result<RideRequest> {
        self.state.begin();

        match self.api.request(ride_id, message).await {
            Ok(request) => {
                tracing::info!(ride_id, request_id = request.id, "Ride requested");
                self.state
                    .update(|s| upsert_by_id(&mut s.my_requests, request.clone(), |r| r.id));
                self.state.finish();
                self.ctx.notify_success("Ride request sent successfully!");
                Ok(request)
            }
            Err(e) => Err(self.failed("Failed to request ride", e)),
        }
    }

    /// Accept or reject a request on one of the driver's rides.
    pub async fn respond_to_request(
        &self,
        request_id: i64,
        status: RideRequestStatus,
    ) -> Result<RideRequest> {
        self.state.begin();

        if status == RideRequestStatus::Pending {
            let err = AppError::Validation("A request can only be accepted or rejected".to_string());
            return Err(self.failed("Failed to update ride request", err));
        }

        match self.api.respond_to_request(request_id, status).await {
            Ok(updated) => {
                self.state.update(|s| {
                    if let Some(entry) = s
                        .incoming_requests
                        .iter_mut()
                        .find(|r| r.id == request_id)
                    {
                        *entry = updated.clone();
                    }
                });
                self.state.finish();
                let verb = match status {
                    RideRequestStatus::Accepted => "accepted",
                    _ => "rejected",
                };
                self.ctx.notify_success(&format!("Ride request {}", verb));
                Ok(updated)
            }
            Err(e) => Err(self.failed("Failed to update ride request", e)),
        }
    }

    async fn check_update(&self, ride_id: i64, patch: &RidePatch) -> Result<()> {
        check_ride_patch(patch, None)?;
        if patch.seats_available.is_none() {
            return Ok(());
        }

        let cached = self
            .state
            .read(|s| s.my_rides.iter().find(|r| r.id == ride_id).cloned());
        let current = match cached {
            Some(ride) => ride,
            None => self.api.details(ride_id).await?,
        };
        check_ride_patch(patch, current.car.as_ref())
    }

    fn failed(&self, context: &str, err: AppError) -> AppError {
        tracing::warn!(error = %err, "{}", context);
        self.state.fail(&err);
        self.ctx.notify_failure("Error", &err);
        err
    }
}
