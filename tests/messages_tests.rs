// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Optimistic message sending: entries appear at once and are either
//! confirmed in place or rolled back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rideshare_client::error::AppError;
use rideshare_client::notify::NotificationKind;
use rideshare_client::stores::{MessageStore, SendState};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

mod common;

use common::TestApp;

#[derive(Default)]
struct Backend {
    /// Reject every send with a 500
    fail_sends: AtomicBool,
    /// Hold sends until `gate` is notified
    gated: AtomicBool,
    gate: Notify,
    next_id: AtomicI64,
    sends: AtomicUsize,
}

type Shared = Arc<Backend>;

async fn conversations() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "user": { "id": 2, "name": "John Doe" },
            "lastMessage": common::message_json(10, 2, 1, "Ready for tomorrow?"),
            "unreadCount": 2,
            "ride_id": 1
        },
        {
            "id": 2,
            "user": { "id": 3, "name": "Jane Smith" },
            "lastMessage": common::message_json(11, 1, 3, "Thanks!"),
            "unreadCount": 1
        }
    ]))
}

async fn thread(Path(user_id): Path<i64>) -> Json<Value> {
    Json(json!([
        common::message_json(20, user_id, 1, "What time should we meet?"),
        common::message_json(21, 1, user_id, "8:00 at the main entrance"),
    ]))
}

async fn send(
    State(backend): State<Shared>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    backend.sends.fetch_add(1, Ordering::SeqCst);
    if backend.gated.load(Ordering::SeqCst) {
        backend.gate.notified().await;
    }
    if backend.fail_sends.load(Ordering::SeqCst) {
        return Err(common::detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Message could not be stored",
        ));
    }

    let id = 100 + backend.next_id.fetch_add(1, Ordering::SeqCst);
    let receiver_id = body["receiver_id"].as_i64().unwrap();
    let mut message = common::message_json(id, 1, receiver_id, body["content"].as_str().unwrap());
    message["ride_id"] = body["ride_id"].clone();
    message["receiver"] = json!({ "id": receiver_id, "name": format!("Peer {}", receiver_id) });
    Ok(Json(message))
}

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/messages/", post(send))
        .route("/api/messages/conversations", get(conversations))
        .route("/api/messages/{user_id}", get(thread))
        .with_state(backend)
}

async fn setup() -> (TestApp, Shared) {
    let backend = Shared::default();
    let base = common::spawn_backend(router(backend.clone())).await;
    let test = TestApp::signed_in(&base);
    test.app.messages.get_conversations().await.unwrap();
    (test, backend)
}

/// Poll until the store shows a pending entry, then release the backend.
async fn release_when_pending(store: &MessageStore, backend: &Backend) {
    while !store.current_conversation().iter().any(|e| e.is_pending()) {
        tokio::task::yield_now().await;
    }
    let (temp_id, state) = store.send_states().pop().unwrap();
    assert_eq!(state, SendState::Pending);
    assert_eq!(store.send_state(temp_id), Some(SendState::Pending));
    backend.gate.notify_one();
}

#[tokio::test]
async fn test_failed_send_restores_conversation() {
    // Reads come from demo data; the send itself has nowhere to go.
    let base = common::unreachable_backend().await;
    let test = TestApp::with_fixtures(&base);
    let store = &test.app.messages;

    store.get_conversations().await.unwrap();
    store.open_conversation(5).await.unwrap();
    let conversations_before = store.conversations();
    let thread_len_before = store.current_conversation().len();

    let err = store.send_message(5, "hello", None).await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(store.conversations(), conversations_before);
    assert!(store.conversations().iter().all(|c| c.peer_id() != 5));
    assert_eq!(store.current_conversation().len(), thread_len_before);
    assert!(store.current_conversation().iter().all(|e| !e.is_pending()));

    let sends = store.send_states();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].1, SendState::RolledBack);

    let errors = test.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "Message not sent");
    assert!(store.error().is_some());
}

#[tokio::test]
async fn test_optimistic_entry_confirmed_in_place() {
    let (test, backend) = setup().await;
    let store = &test.app.messages;
    store.open_conversation(2).await.unwrap();
    let position = store.current_conversation().len();
    backend.gated.store(true, Ordering::SeqCst);

    let (result, ()) = tokio::join!(
        store.send_message(2, "  On my way  ", Some(1)),
        release_when_pending(store, &backend)
    );
    let message = result.unwrap();

    assert_eq!(message.content, "On my way");
    let thread = store.current_conversation();
    assert_eq!(thread.len(), position + 1);
    assert_eq!(thread[position].message().map(|m| m.id), Some(message.id));

    let sends = store.send_states();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].1, SendState::Confirmed(message.id));

    // The existing conversation is updated where it is.
    let conversations = store.conversations();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].peer_id(), 2);
    assert_eq!(conversations[0].last_message.id, message.id);
    assert!(test.errors().is_empty());
}

#[tokio::test]
async fn test_rejected_send_removes_pending_entry() {
    let (test, backend) = setup().await;
    let store = &test.app.messages;
    store.open_conversation(2).await.unwrap();
    let thread_before = store.current_conversation();
    let conversations_before = store.conversations();
    backend.gated.store(true, Ordering::SeqCst);
    backend.fail_sends.store(true, Ordering::SeqCst);

    let (result, ()) = tokio::join!(
        store.send_message(2, "hello", None),
        release_when_pending(store, &backend)
    );

    assert_eq!(
        result.unwrap_err(),
        AppError::Api {
            status: 500,
            detail: "Message could not be stored".to_string()
        }
    );
    assert_eq!(store.current_conversation(), thread_before);
    assert_eq!(store.conversations(), conversations_before);
    assert_eq!(store.send_states()[0].1, SendState::RolledBack);

    let errors = test.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, NotificationKind::Error);
    assert_eq!(errors[0].message, "Message could not be stored");
}

#[tokio::test]
async fn test_first_message_starts_conversation() {
    let (test, _backend) = setup().await;
    let store = &test.app.messages;

    let message = store.send_message(9, "Hi there", Some(4)).await.unwrap();

    let conversations = store.conversations();
    assert_eq!(conversations.len(), 3);
    let first = &conversations[0];
    assert_eq!(first.peer_id(), 9);
    assert_eq!(first.user.name, "Peer 9");
    assert_eq!(first.last_message.id, message.id);
    assert_eq!(first.ride_id, Some(4));
    assert_eq!(first.unread_count, 0);
}

#[tokio::test]
async fn test_send_to_other_peer_leaves_open_thread_alone() {
    let (test, _backend) = setup().await;
    let store = &test.app.messages;
    store.open_conversation(2).await.unwrap();
    let thread_before = store.current_conversation();

    let message = store.send_message(3, "See you Friday", None).await.unwrap();

    assert_eq!(store.current_conversation(), thread_before);
    let jane = store
        .conversations()
        .into_iter()
        .find(|c| c.peer_id() == 3)
        .unwrap();
    assert_eq!(jane.last_message.id, message.id);
}

#[tokio::test]
async fn test_blank_message_rejected_locally() {
    let (test, backend) = setup().await;
    let store = &test.app.messages;
    store.open_conversation(2).await.unwrap();
    let thread_len = store.current_conversation().len();

    let err = store.send_message(2, "   ", None).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(backend.sends.load(Ordering::SeqCst), 0);
    assert_eq!(store.current_conversation().len(), thread_len);
    assert!(store.send_states().is_empty());
}

#[tokio::test]
async fn test_unread_counts() {
    let (test, _backend) = setup().await;
    let store = &test.app.messages;

    assert_eq!(store.total_unread_count(), 3);
    store.mark_conversation_as_read(2);
    assert_eq!(store.total_unread_count(), 1);
    store.mark_conversation_as_read(42);
    assert_eq!(store.total_unread_count(), 1);
}

#[tokio::test]
async fn test_opening_thread_forgets_settled_sends() {
    let (test, _backend) = setup().await;
    let store = &test.app.messages;
    store.open_conversation(2).await.unwrap();
    store.send_message(2, "one", None).await.unwrap();
    assert_eq!(store.send_states().len(), 1);

    let messages = store.open_conversation(3).await.unwrap();

    assert!(store.send_states().is_empty());
    assert_eq!(store.current_peer(), Some(3));
    assert_eq!(store.current_conversation().len(), messages.len());
}
