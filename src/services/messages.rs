// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Messaging endpoints.

use crate::error::Result;
use crate::models::{Conversation, Message, NewMessage};
use crate::services::ApiClient;

#[derive(Clone)]
pub struct MessagesApi {
    client: ApiClient,
}

impl MessagesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn send(&self, message: &NewMessage) -> Result<Message> {
        self.client.post("/messages/", message).await
    }

    pub async fn conversations(&self) -> Result<Vec<Conversation>> {
        let conversations: Option<Vec<Conversation>> =
            self.client.get("/messages/conversations").await?;
        Ok(conversations.unwrap_or_default())
    }

    /// Full message history with one user, oldest first.
    pub async fn conversation_with(&self, user_id: i64) -> Result<Vec<Message>> {
        let messages: Option<Vec<Message>> =
            self.client.get(&format!("/messages/{}", user_id)).await?;
        Ok(messages.unwrap_or_default())
    }
}
