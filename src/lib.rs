// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Rideshare client: typed access to the ride-sharing REST backend.
//!
//! This crate provides the transport, per-resource API clients and the
//! client-side stores (rides, recurring rides, messages, auth) that screens
//! render from.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod notify;
pub mod services;
pub mod session;
pub mod stores;
pub mod time_utils;
pub mod validation;

use config::Config;
use notify::Notifier;
use services::{ApiClient, AssistantApi, CarsApi, LocationsApi, UsersApi};
use session::Session;
use std::sync::Arc;
use stores::{AuthStore, MessageStore, RecurringRideStore, RideStore, StoreContext};

/// Shared application state.
pub struct RideShareApp {
    pub config: Config,
    pub session: Arc<Session>,
    pub client: ApiClient,
    pub auth: AuthStore,
    pub rides: RideStore,
    pub recurring_rides: RecurringRideStore,
    pub messages: MessageStore,
    pub cars: CarsApi,
    pub locations: LocationsApi,
    pub users: UsersApi,
    pub assistant: AssistantApi,
}

impl RideShareApp {
    pub fn new(config: Config, session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        let ctx = StoreContext::new(&config, session.clone(), notifier);
        let client = ctx.client.clone();
        Self {
            auth: AuthStore::new(ctx.clone()),
            rides: RideStore::new(ctx.clone()),
            recurring_rides: RecurringRideStore::new(ctx.clone()),
            messages: MessageStore::new(ctx),
            cars: CarsApi::new(client.clone()),
            locations: LocationsApi::new(client.clone()),
            users: UsersApi::new(client.clone()),
            assistant: AssistantApi::new(client.clone()),
            client,
            config,
            session,
        }
    }
}
