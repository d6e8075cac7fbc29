// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - transport helper and typed REST clients.

pub mod assistant;
pub mod auth;
pub mod cars;
pub mod locations;
pub mod messages;
pub mod recurring_rides;
pub mod rides;
pub mod transport;
pub mod users;

pub use assistant::AssistantApi;
pub use auth::AuthApi;
pub use cars::CarsApi;
pub use locations::LocationsApi;
pub use messages::MessagesApi;
pub use recurring_rides::RecurringRidesApi;
pub use rides::RidesApi;
pub use transport::ApiClient;
pub use users::UsersApi;
