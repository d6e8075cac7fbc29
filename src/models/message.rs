// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Direct messages and conversation summaries.

use crate::models::UserSummary;
use serde::{Deserialize, Serialize};

/// A message accepted and stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub ride_id: Option<i64>,
    pub created_at: String,
    pub sender: Option<UserSummary>,
    pub receiver: Option<UserSummary>,
}

/// Outgoing message body for `POST /messages/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMessage {
    pub receiver_id: i64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ride_id: Option<i64>,
}

/// Latest message and unread count for one counterparty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    /// The other participant
    pub user: UserSummary,
    #[serde(rename = "lastMessage")]
    pub last_message: Message,
    #[serde(rename = "unreadCount", default)]
    pub unread_count: u32,
    pub ride_id: Option<i64>,
}

impl Conversation {
    /// Identity of the other participant; conversations are keyed by it.
    pub fn peer_id(&self) -> i64 {
        self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversation_uses_backend_field_names() {
        let conv: Conversation = serde_json::from_value(json!({
            "id": 1,
            "user": { "id": 2, "name": "John Doe", "photo_url": null },
            "lastMessage": {
                "id": 10,
                "sender_id": 2,
                "receiver_id": 1,
                "content": "Ready?",
                "created_at": "2025-01-01T08:00:00Z"
            },
            "unreadCount": 2
        }))
        .unwrap();
        assert_eq!(conv.peer_id(), 2);
        assert_eq!(conv.unread_count, 2);
        assert_eq!(conv.last_message.content, "Ready?");
    }

    #[test]
    fn test_new_message_skips_missing_ride() {
        let msg = NewMessage {
            receiver_id: 5,
            content: "hello".to_string(),
            ride_id: None,
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "receiver_id": 5, "content": "hello" })
        );
    }
}
