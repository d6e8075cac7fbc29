// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recurring ride model: a driver's standing offer of a fixed route on a
//! weekly cadence.

use crate::models::{Car, UserSummary};
use crate::validation::validate_start_time;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Schedule type used when the creation form leaves it unset.
pub const DEFAULT_SCHEDULE_TYPE: &str = "weekly";

/// Lifecycle status of a recurring ride.
///
/// Only the driver changes it: `active -> paused`, `active -> cancelled`
/// and `paused -> active`. Cancelled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringRideStatus {
    Active,
    Paused,
    Cancelled,
}

impl RecurringRideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringRideStatus::Active => "active",
            RecurringRideStatus::Paused => "paused",
            RecurringRideStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a driver may move a ride from `self` to `next`.
    /// Re-asserting the current status is always allowed.
    pub fn can_transition_to(self, next: RecurringRideStatus) -> bool {
        use RecurringRideStatus::*;
        matches!(
            (self, next),
            (Active, Paused) | (Active, Cancelled) | (Paused, Active)
        ) || self == next
    }
}

impl fmt::Display for RecurringRideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurring ride as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRide {
    pub id: i64,
    pub driver_id: i64,
    pub car_id: i64,
    pub start_location: String,
    pub end_location: String,
    /// 0 = Monday, 6 = Sunday
    pub day_of_week: u8,
    /// Local departure time, `HH:MM` (the backend may append `:SS`)
    pub start_time: String,
    pub seats_available: u32,
    pub total_fare: f64,
    #[serde(default = "default_schedule_type")]
    pub schedule_type: String,
    pub status: RecurringRideStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub driver: Option<UserSummary>,
    pub car: Option<Car>,
}

fn default_schedule_type() -> String {
    DEFAULT_SCHEDULE_TYPE.to_string()
}

/// Creation form for a recurring ride.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewRecurringRide {
    #[validate(range(min = 1, message = "Please select a car for your ride"))]
    pub car_id: i64,
    #[validate(length(min = 1, message = "Please enter both start and end locations"))]
    pub start_location: String,
    #[validate(length(min = 1, message = "Please enter both start and end locations"))]
    pub end_location: String,
    #[validate(range(max = 6, message = "Day of week must be between 0 (Monday) and 6 (Sunday)"))]
    pub day_of_week: u8,
    #[validate(custom(function = "validate_start_time"))]
    pub start_time: String,
    #[validate(range(min = 1, message = "At least one seat must be offered"))]
    pub seats_available: u32,
    #[validate(range(min = 0.0, message = "Fare cannot be negative"))]
    pub total_fare: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<String>,
}

/// Partial update for a recurring ride. Unset fields are left alone; set
/// fields follow the same rules as the creation form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct RecurringRidePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please enter both start and end locations"))]
    pub start_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Please enter both start and end locations"))]
    pub end_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 6, message = "Day of week must be between 0 (Monday) and 6 (Sunday)"))]
    pub day_of_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_start_time"))]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "At least one seat must be offered"))]
    pub seats_available: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Fare cannot be negative"))]
    pub total_fare: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecurringRideStatus>,
}

impl RecurringRidePatch {
    /// Patch that only changes the status.
    pub fn status(status: RecurringRideStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
