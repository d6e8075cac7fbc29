// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat assistant endpoint.

use crate::error::Result;
use crate::services::ApiClient;
use serde::{Deserialize, Serialize};

/// Shown in place of an answer when the assistant cannot be reached.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request right now.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Clone)]
pub struct AssistantApi {
    client: ApiClient,
}

impl AssistantApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Ask the assistant a question and return its answer.
    pub async fn chat(&self, message: &str) -> Result<String> {
        let reply: ChatReply = self
            .client
            .post("/genai-chat/api/genai-chat", &ChatRequest { message })
            .await?;
        Ok(reply.reply)
    }
}
