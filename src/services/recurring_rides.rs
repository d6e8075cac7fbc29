// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recurring ride endpoints.

use crate::error::Result;
use crate::models::{
    DayOfWeekOption, NewRecurringRide, RecurringRide, RecurringRidePatch, ScheduleTypeOption,
};
use crate::services::ApiClient;

#[derive(Clone)]
pub struct RecurringRidesApi {
    client: ApiClient,
}

impl RecurringRidesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Active recurring rides, optionally only those on one day of the week.
    pub async fn search(&self, day_of_week: Option<u8>) -> Result<Vec<RecurringRide>> {
        let rides: Option<Vec<RecurringRide>> = match day_of_week {
            Some(day) => {
                self.client
                    .get_query("/recurring-rides/", &[("day_of_week", day)])
                    .await?
            }
            None => self.client.get("/recurring-rides/").await?,
        };
        Ok(rides.unwrap_or_default())
    }

    pub async fn create(&self, ride: &NewRecurringRide) -> Result<RecurringRide> {
        self.client.post("/recurring-rides/", ride).await
    }

    pub async fn mine(&self) -> Result<Vec<RecurringRide>> {
        let rides: Option<Vec<RecurringRide>> = self
            .client
            .get("/recurring-rides/my-recurring-rides")
            .await?;
        Ok(rides.unwrap_or_default())
    }

    pub async fn get(&self, id: i64) -> Result<RecurringRide> {
        self.client.get(&format!("/recurring-rides/{}", id)).await
    }

    pub async fn update(&self, id: i64, patch: &RecurringRidePatch) -> Result<RecurringRide> {
        self.client
            .put(&format!("/recurring-rides/{}", id), patch)
            .await
    }

    /// Hard delete. The backend answers with a confirmation message.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .delete(&format!("/recurring-rides/{}", id))
            .await?;
        Ok(())
    }

    pub async fn days_of_week_options(&self) -> Result<Vec<DayOfWeekOption>> {
        let options: Option<Vec<DayOfWeekOption>> = self
            .client
            .get("/recurring-rides/options/days-of-week")
            .await?;
        Ok(options.unwrap_or_default())
    }

    pub async fn schedule_type_options(&self) -> Result<Vec<ScheduleTypeOption>> {
        let options: Option<Vec<ScheduleTypeOption>> = self
            .client
            .get("/recurring-rides/options/schedule-types")
            .await?;
        Ok(options.unwrap_or_default())
    }
}
