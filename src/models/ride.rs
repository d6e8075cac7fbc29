// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! One-off rides, requests to join them, and ride history.

use crate::models::{Car, UserSummary};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default note attached to a join request when the rider writes none.
pub const DEFAULT_REQUEST_MESSAGE: &str = "I'd like to join your ride";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Active,
    Completed,
    Cancelled,
}

/// A single scheduled trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: i64,
    pub driver_id: i64,
    pub car_id: i64,
    pub start_location: String,
    pub end_location: String,
    /// Absolute departure timestamp (ISO 8601)
    pub start_time: String,
    pub seats_available: u32,
    pub total_fare: f64,
    pub status: RideStatus,
    pub created_at: Option<String>,
    pub driver: Option<UserSummary>,
    pub car: Option<Car>,
}

/// Creation form for a one-off ride.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewRide {
    #[validate(range(min = 1, message = "Please select a car for your ride"))]
    pub car_id: i64,
    #[validate(length(min = 1, message = "Please enter both start and end locations"))]
    pub start_location: String,
    #[validate(length(min = 1, message = "Please enter both start and end locations"))]
    pub end_location: String,
    /// Departure timestamp (ISO 8601)
    pub start_time: String,
    #[validate(range(min = 1, message = "At least one seat must be offered"))]
    pub seats_available: u32,
    #[validate(range(min = 0.0, message = "Fare cannot be negative"))]
    pub total_fare: f64,
}

/// Partial update for a ride.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct RidePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "At least one seat must be offered"))]
    pub seats_available: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RideStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A rider's request to occupy a seat on a ride.
///
/// The backend allows at most one request per (rider, ride) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub id: i64,
    pub rider_id: i64,
    pub ride_id: i64,
    pub status: RideRequestStatus,
    pub message: Option<String>,
    pub requested_at: Option<String>,
    pub rider: Option<UserSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideRole {
    Driver,
    Rider,
}

/// Completed-ride record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideHistoryEntry {
    pub id: i64,
    pub user_id: i64,
    pub ride_id: i64,
    pub role: RideRole,
    pub joined_at: Option<String>,
    pub completed_at: Option<String>,
    pub rating_given: Option<u8>,
    pub rating_received: Option<u8>,
}
