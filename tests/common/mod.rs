// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::Json;
use rideshare_client::config::{Config, DataSource};
use rideshare_client::notify::{CollectingNotifier, Notification, NotificationKind};
use rideshare_client::session::Session;
use rideshare_client::RideShareApp;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve a fake backend on an ephemeral local port.
/// Returns the API base URL (`http://127.0.0.1:<port>/api`).
#[allow(dead_code)]
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// Base URL of a port nothing listens on: every request fails with a
/// connection error.
#[allow(dead_code)]
pub async fn unreachable_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// App wired to `base_url`, with notifications collected for inspection.
pub struct TestApp {
    pub app: RideShareApp,
    pub notifier: Arc<CollectingNotifier>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(Config::with_base_url(base_url).unwrap())
    }

    /// Same, with a bearer token already stored.
    pub fn signed_in(base_url: &str) -> Self {
        let test = Self::new(base_url);
        test.app.session.set_token("test-token").unwrap();
        test
    }

    /// Reads served from the demo fixtures.
    pub fn with_fixtures(base_url: &str) -> Self {
        let config = Config {
            data_source: DataSource::Fixtures,
            ..Config::with_base_url(base_url).unwrap()
        };
        Self::with_config(config)
    }

    fn with_config(config: Config) -> Self {
        let notifier = Arc::new(CollectingNotifier::default());
        let session = Arc::new(Session::in_memory());
        let app = RideShareApp::new(config, session, notifier.clone());
        Self { app, notifier }
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifier
            .drain()
            .into_iter()
            .filter(|n| n.kind == NotificationKind::Error)
            .collect()
    }
}

/// Error body the way the backend sends it.
#[allow(dead_code)]
pub fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

#[allow(dead_code)]
pub fn user_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("user{}@example.com", id),
        "is_driver": true,
        "is_rider": true,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

#[allow(dead_code)]
pub fn message_json(id: i64, sender_id: i64, receiver_id: i64, content: &str) -> Value {
    json!({
        "id": id,
        "sender_id": sender_id,
        "receiver_id": receiver_id,
        "content": content,
        "created_at": "2025-03-10T12:00:00Z"
    })
}

#[allow(dead_code)]
pub fn ride_json(id: i64, seats_available: u32) -> Value {
    json!({
        "id": id,
        "driver_id": 2,
        "car_id": 1,
        "start_location": "Palo Alto",
        "end_location": "Mountain View",
        "start_time": "2025-03-11T08:00:00Z",
        "seats_available": seats_available,
        "total_fare": 15.0,
        "status": "active"
    })
}
