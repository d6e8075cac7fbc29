// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side state containers.
//!
//! Each store owns the in-memory lists a screen renders, calls the typed API
//! clients, and records loading/error status. State is behind a lock that is
//! never held across an `.await`, so overlapping calls to the same operation
//! resolve last-writer-wins.

pub mod auth;
pub mod messages;
pub mod recurring_rides;
pub mod rides;

pub use auth::{AuthStore, LoginOutcome};
pub use messages::{ConversationEntry, MessageStore, OutgoingDraft, SendState, TempId};
pub use recurring_rides::RecurringRideStore;
pub use rides::RideStore;

use crate::config::{Config, DataSource};
use crate::error::AppError;
use crate::fixtures::FixtureProvider;
use crate::notify::{Notification, Notifier};
use crate::services::ApiClient;
use crate::session::Session;
use std::sync::{Arc, PoisonError, RwLock};

/// Collaborators shared by every store.
#[derive(Clone)]
pub struct StoreContext {
    pub client: ApiClient,
    /// Set when reads should be served from demo data
    pub fixtures: Option<FixtureProvider>,
    pub notifier: Arc<dyn Notifier>,
}

impl StoreContext {
    pub fn new(config: &Config, session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Self {
        let fixtures = match config.data_source {
            DataSource::Live => None,
            DataSource::Fixtures => {
                tracing::info!("Serving reads from demo fixtures");
                Some(FixtureProvider::default())
            }
        };
        Self {
            client: ApiClient::new(config, session),
            fixtures,
            notifier,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        self.client.session()
    }

    pub(crate) fn notify_success(&self, message: &str) {
        self.notifier.notify(Notification::success(message));
    }

    pub(crate) fn notify_failure(&self, title: &str, err: &AppError) {
        self.notifier
            .notify(Notification::error(title, err.user_message()));
    }
}

/// Loading flag and last error text, as shown by a screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStatus {
    pub loading: bool,
    pub error: Option<String>,
}

pub(crate) trait HasStatus {
    fn status_mut(&mut self) -> &mut LoadStatus;
}

/// Lock-protected store state.
pub(crate) struct StateCell<T> {
    inner: RwLock<T>,
}

impl<T> StateCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

impl<T: HasStatus> StateCell<T> {
    /// Mark an operation as started: loading on, previous error cleared.
    pub(crate) fn begin(&self) {
        self.update(|s| {
            let status = s.status_mut();
            status.loading = true;
            status.error = None;
        });
    }

    pub(crate) fn finish(&self) {
        self.update(|s| s.status_mut().loading = false);
    }

    /// Record a failure; the rest of the state is left alone.
    pub(crate) fn fail(&self, err: &AppError) {
        self.update(|s| {
            let status = s.status_mut();
            status.loading = false;
            status.error = Some(err.user_message());
        });
    }
}

/// Replace the entry with the same id, or append it if absent.
pub(crate) fn upsert_by_id<T>(list: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> i64) {
    let id = id_of(&item);
    match list.iter().position(|existing| id_of(existing) == id) {
        Some(index) => list[index] = item,
        None => list.push(item),
    }
}
