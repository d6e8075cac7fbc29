// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recurring-ride state: search results, the driver's own rides, and the
//! day/schedule option tables.

use crate::error::{AppError, Result};
use crate::models::{
    Car, NewRecurringRide, OptionTables, RecurringRide, RecurringRidePatch, RecurringRideStatus,
};
use crate::services::RecurringRidesApi;
use crate::stores::{upsert_by_id, HasStatus, LoadStatus, StateCell, StoreContext};
use crate::validation::{
    check_new_recurring_ride, check_recurring_ride_patch, check_status_transition,
};

/// Snapshot of everything the recurring-ride screens render.
#[derive(Debug, Clone, Default)]
pub struct RecurringRideState {
    /// Search results
    pub recurring_rides: Vec<RecurringRide>,
    /// Rides owned by the signed-in driver
    pub my_recurring_rides: Vec<RecurringRide>,
    pub options: OptionTables,
    pub options_loaded: bool,
    pub status: LoadStatus,
}

impl HasStatus for RecurringRideState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct RecurringRideStore {
    ctx: StoreContext,
    api: RecurringRidesApi,
    state: StateCell<RecurringRideState>,
}

impl RecurringRideStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            api: RecurringRidesApi::new(ctx.client.clone()),
            ctx,
            state: StateCell::new(RecurringRideState::default()),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn snapshot(&self) -> RecurringRideState {
        self.state.read(|s| s.clone())
    }

    pub fn recurring_rides(&self) -> Vec<RecurringRide> {
        self.state.read(|s| s.recurring_rides.clone())
    }

    pub fn my_recurring_rides(&self) -> Vec<RecurringRide> {
        self.state.read(|s| s.my_recurring_rides.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.read(|s| s.status.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.status.error.clone())
    }

    /// Label for a day of week from the loaded table, or "Unknown".
    pub fn get_day_label(&self, day_of_week: u8) -> String {
        self.state.read(|s| s.options.day_label(day_of_week))
    }

    /// Label for a schedule type from the loaded table, or the raw value.
    pub fn get_schedule_type_label(&self, schedule_type: &str) -> String {
        self.state
            .read(|s| s.options.schedule_type_label(schedule_type))
    }

    // ─── Options ─────────────────────────────────────────────────

    /// Fetch both option tables. Only the first successful call hits the
    /// backend; later calls are no-ops.
    pub async fn load_options(&self) -> Result<()> {
        if self.state.read(|s| s.options_loaded) {
            return Ok(());
        }

        let options = match &self.ctx.fixtures {
            Some(fixtures) => fixtures.option_tables(),
            None => {
                let (days_of_week, schedule_types) = tokio::try_join!(
                    self.api.days_of_week_options(),
                    self.api.schedule_type_options()
                )
                .inspect_err(|e| tracing::error!(error = %e, "Failed to load ride options"))?;
                OptionTables {
                    days_of_week,
                    schedule_types,
                }
            }
        };

        self.state.update(|s| {
            s.options = options;
            s.options_loaded = true;
        });
        Ok(())
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Search active recurring rides, optionally for one day of the week.
    ///
    /// A failure clears the result list; earlier results are not kept.
    pub async fn search_recurring_rides(
        &self,
        day_of_week: Option<u8>,
    ) -> Result<Vec<RecurringRide>> {
        self.state.begin();

        if let Some(day) = day_of_week.filter(|d| *d > 6) {
            let err = AppError::Validation(format!("Invalid day of week: {}", day));
            self.state.update(|s| s.recurring_rides.clear());
            self.state.fail(&err);
            return Err(err);
        }

        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.recurring_rides(day_of_week)),
            None => self.api.search(day_of_week).await,
        };

        match result {
            Ok(rides) => {
                self.state.update(|s| s.recurring_rides = rides.clone());
                self.state.finish();
                Ok(rides)
            }
            Err(e) => {
                self.state.update(|s| s.recurring_rides.clear());
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    /// Load the signed-in driver's recurring rides into the "mine" list.
    pub async fn get_my_recurring_rides(&self) -> Result<Vec<RecurringRide>> {
        self.state.begin();

        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.my_recurring_rides()),
            None => self.api.mine().await,
        };

        match result {
            Ok(rides) => {
                self.state.update(|s| s.my_recurring_rides = rides.clone());
                self.state.finish();
                Ok(rides)
            }
            Err(e) => {
                self.state.update(|s| s.my_recurring_rides.clear());
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    // ─── Mutations ───────────────────────────────────────────────

    /// Create a recurring ride and add it to the "mine" list.
    ///
    /// Pass the selected car to also check the seat count against it.
    pub async fn create_recurring_ride(
        &self,
        data: &NewRecurringRide,
        car: Option<&Car>,
    ) -> Result<RecurringRide> {
        self.state.begin();

        let result = match check_new_recurring_ride(data, car) {
            Ok(()) => self.api.create(data).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(ride) => {
                tracing::info!(id = ride.id, "Recurring ride created");
                self.state
                    .update(|s| upsert_by_id(&mut s.my_recurring_rides, ride.clone(), |r| r.id));
                self.state.finish();
                self.ctx
                    .notify_success("Recurring ride created successfully!");
                Ok(ride)
            }
            Err(e) => Err(self.failed("Failed to create recurring ride", e)),
        }
    }

    /// Apply a partial update and replace the cached entry with the
    /// backend's version.
    ///
    /// Set fields are validated first. A status or seat change is checked
    /// against the current ride, fetched when it is not cached.
    pub async fn update_recurring_ride(
        &self,
        id: i64,
        patch: &RecurringRidePatch,
    ) -> Result<RecurringRide> {
        self.state.begin();

        let result = match self.check_update(id, patch).await {
            Ok(()) => self.api.update(id, patch).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(updated) => {
                self.state.update(|s| {
                    if let Some(entry) = s.my_recurring_rides.iter_mut().find(|r| r.id == id) {
                        *entry = updated.clone();
                    }
                });
                self.state.finish();
                self.ctx
                    .notify_success("Recurring ride updated successfully!");
                Ok(updated)
            }
            Err(e) => Err(self.failed("Failed to update recurring ride", e)),
        }
    }

    pub async fn pause_recurring_ride(&self, id: i64) -> Result<RecurringRide> {
        self.set_status(id, RecurringRideStatus::Paused).await
    }

    pub async fn resume_recurring_ride(&self, id: i64) -> Result<RecurringRide> {
        self.set_status(id, RecurringRideStatus::Active).await
    }

    /// Soft delete: the ride stays on record with status `cancelled`.
    pub async fn cancel_recurring_ride(&self, id: i64) -> Result<RecurringRide> {
        self.set_status(id, RecurringRideStatus::Cancelled).await
    }

    async fn set_status(&self, id: i64, status: RecurringRideStatus) -> Result<RecurringRide> {
        self.update_recurring_ride(id, &RecurringRidePatch::status(status))
            .await
    }

    /// Hard delete; the entry leaves the "mine" list once the backend confirms.
    pub async fn delete_recurring_ride(&self, id: i64) -> Result<()> {
        self.state.begin();

        match self.api.delete(id).await {
            Ok(()) => {
                self.state
                    .update(|s| s.my_recurring_rides.retain(|r| r.id != id));
                self.state.finish();
                self.ctx
                    .notify_success("Recurring ride deleted successfully!");
                Ok(())
            }
            Err(e) => Err(self.failed("Failed to delete recurring ride", e)),
        }
    }

    async fn check_update(&self, id: i64, patch: &RecurringRidePatch) -> Result<()> {
        check_recurring_ride_patch(patch, None)?;
        if patch.status.is_none() && patch.seats_available.is_none() {
            return Ok(());
        }

        let cached = self.state.read(|s| {
            s.my_recurring_rides.iter().find(|r| r.id == id).cloned()
        });
        let current = match cached {
            Some(ride) => ride,
            None => self.api.get(id).await?,
        };

        if let Some(next) = patch.status {
            check_status_transition(current.status, next)?;
        }
        check_recurring_ride_patch(patch, current.car.as_ref())
    }

    /// Record a failed mutation and tell the user.
    fn failed(&self, context: &str, err: AppError) -> AppError {
        tracing::warn!(error = %err, "{}", context);
        self.state.fail(&err);
        self.ctx.notify_failure("Error", &err);
        err
    }
}
