// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models mirroring the backend's JSON resources.

pub mod car;
pub mod location;
pub mod message;
pub mod options;
pub mod recurring_ride;
pub mod ride;
pub mod user;

pub use car::{Car, CarPatch, NewCar};
pub use location::{Location, NewLocation};
pub use message::{Conversation, Message, NewMessage};
pub use options::{DayOfWeekOption, OptionTables, ScheduleTypeOption};
pub use recurring_ride::{
    NewRecurringRide, RecurringRide, RecurringRidePatch, RecurringRideStatus,
};
pub use ride::{
    NewRide, Ride, RideHistoryEntry, RidePatch, RideRequest, RideRequestStatus, RideRole,
    RideStatus,
};
pub use user::{AuthResponse, ProfilePatch, Registration, ScheduleEntry, User, UserSummary};
