// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversations and the open message thread, with optimistic sends.
//!
//! A message being sent shows up in the open thread at once as a
//! [`ConversationEntry::Pending`] tagged with a [`TempId`]. Each send moves
//! through [`SendState`]: `Pending` becomes `Confirmed` when the backend
//! accepts the message (the entry is replaced in place) or `RolledBack` when
//! it does not (the entry is removed). Temporary ids live in their own type,
//! so they can never be mistaken for a backend message id.

use crate::error::{AppError, Result};
use crate::models::{Conversation, Message, NewMessage, UserSummary};
use crate::services::MessagesApi;
use crate::stores::{HasStatus, LoadStatus, StateCell, StoreContext};
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Name shown for a conversation synthesized from a first outgoing message.
const UNKNOWN_PEER_NAME: &str = "User";

/// Settled sends remembered for [`MessageStore::send_state`]. Older ones are
/// dropped as new sends settle.
pub const SETTLED_SEND_HISTORY: usize = 32;

/// Client-side identifier of an unconfirmed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TempId(u64);

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tmp-{}", self.0)
    }
}

/// Lifecycle of one optimistic send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Pending,
    /// Accepted by the backend under this message id
    Confirmed(i64),
    RolledBack,
}

impl SendState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SendState::Pending)
    }

    /// `Pending → Confirmed`. Settled states do not change.
    pub fn confirm(self, message_id: i64) -> SendState {
        match self {
            SendState::Pending => SendState::Confirmed(message_id),
            settled => settled,
        }
    }

    /// `Pending → RolledBack`. Settled states do not change.
    pub fn roll_back(self) -> SendState {
        match self {
            SendState::Pending => SendState::RolledBack,
            settled => settled,
        }
    }
}

/// Locally synthesized message awaiting the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingDraft {
    /// Signed-in user, when known
    pub sender_id: Option<i64>,
    pub receiver_id: i64,
    pub content: String,
    pub ride_id: Option<i64>,
    pub created_at: String,
}

/// One row of the open thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationEntry {
    Pending { temp_id: TempId, draft: OutgoingDraft },
    Delivered(Message),
}

impl ConversationEntry {
    pub fn content(&self) -> &str {
        match self {
            ConversationEntry::Pending { draft, .. } => &draft.content,
            ConversationEntry::Delivered(msg) => &msg.content,
        }
    }

    pub fn created_at(&self) -> &str {
        match self {
            ConversationEntry::Pending { draft, .. } => &draft.created_at,
            ConversationEntry::Delivered(msg) => &msg.created_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ConversationEntry::Pending { .. })
    }

    pub fn temp_id(&self) -> Option<TempId> {
        match self {
            ConversationEntry::Pending { temp_id, .. } => Some(*temp_id),
            ConversationEntry::Delivered(_) => None,
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            ConversationEntry::Pending { .. } => None,
            ConversationEntry::Delivered(msg) => Some(msg),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageState {
    pub conversations: Vec<Conversation>,
    /// The open thread, oldest first
    pub current: Vec<ConversationEntry>,
    /// Counterparty of the open thread
    pub current_peer: Option<i64>,
    pub sends: HashMap<TempId, SendState>,
    pub status: LoadStatus,
}

impl HasStatus for MessageState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct MessageStore {
    ctx: StoreContext,
    api: MessagesApi,
    state: StateCell<MessageState>,
    next_temp_id: AtomicU64,
}

impl MessageStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            api: MessagesApi::new(ctx.client.clone()),
            ctx,
            state: StateCell::new(MessageState::default()),
            next_temp_id: AtomicU64::new(1),
        }
    }

    pub fn snapshot(&self) -> MessageState {
        self.state.read(|s| s.clone())
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.state.read(|s| s.conversations.clone())
    }

    pub fn current_conversation(&self) -> Vec<ConversationEntry> {
        self.state.read(|s| s.current.clone())
    }

    pub fn current_peer(&self) -> Option<i64> {
        self.state.read(|s| s.current_peer)
    }

    pub fn send_state(&self, temp_id: TempId) -> Option<SendState> {
        self.state.read(|s| s.sends.get(&temp_id).copied())
    }

    /// Every tracked send, ordered by temporary id.
    pub fn send_states(&self) -> Vec<(TempId, SendState)> {
        let mut sends: Vec<_> = self
            .state
            .read(|s| s.sends.iter().map(|(id, st)| (*id, *st)).collect());
        sends.sort_by_key(|(id, _)| *id);
        sends
    }

    pub fn loading(&self) -> bool {
        self.state.read(|s| s.status.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.read(|s| s.status.error.clone())
    }

    pub fn total_unread_count(&self) -> u32 {
        self.state
            .read(|s| s.conversations.iter().map(|c| c.unread_count).sum())
    }

    /// Zero the unread badge for one counterparty. Local only.
    pub fn mark_conversation_as_read(&self, user_id: i64) {
        self.state.update(|s| {
            for conv in s.conversations.iter_mut().filter(|c| c.peer_id() == user_id) {
                conv.unread_count = 0;
            }
        });
    }

    pub async fn get_conversations(&self) -> Result<Vec<Conversation>> {
        self.state.begin();

        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.conversations()),
            None => self.api.conversations().await,
        };

        match result {
            Ok(conversations) => {
                self.state
                    .update(|s| s.conversations = conversations.clone());
                self.state.finish();
                Ok(conversations)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load conversations");
                self.state.update(|s| s.conversations.clear());
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    /// Load the thread with `user_id` and make it the open one.
    ///
    /// Settled sends are forgotten; sends still in flight keep their state.
    pub async fn open_conversation(&self, user_id: i64) -> Result<Vec<Message>> {
        self.state.begin();
        self.state.update(|s| {
            s.current_peer = Some(user_id);
            s.sends.retain(|_, st| !st.is_settled());
        });

        let result = match &self.ctx.fixtures {
            Some(fixtures) => Ok(fixtures.conversation_with(user_id)),
            None => self.api.conversation_with(user_id).await,
        };

        match result {
            Ok(messages) => {
                self.state.update(|s| {
                    s.current = messages
                        .iter()
                        .cloned()
                        .map(ConversationEntry::Delivered)
                        .collect();
                });
                self.state.finish();
                Ok(messages)
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to load conversation");
                self.state.update(|s| s.current.clear());
                self.state.fail(&e);
                Err(e)
            }
        }
    }

    /// Send a message with an optimistic entry in the open thread.
    ///
    /// The entry is only shown when no thread is open or the open thread is
    /// with `receiver_id`. Once the call settles, the thread holds the
    /// confirmed message in the entry's place, or no trace of it.
    pub async fn send_message(
        &self,
        receiver_id: i64,
        content: &str,
        ride_id: Option<i64>,
    ) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() {
            let err = AppError::Validation("Message cannot be empty".to_string());
            self.state.fail(&err);
            return Err(err);
        }

        let temp_id = TempId(self.next_temp_id.fetch_add(1, Ordering::Relaxed));
        let draft = OutgoingDraft {
            sender_id: self.ctx.session().user_id(),
            receiver_id,
            content: content.to_string(),
            ride_id,
            created_at: format_utc_rfc3339(Utc::now()),
        };

        self.state.begin();
        self.state.update(|s| {
            s.sends.insert(temp_id, SendState::Pending);
            if s.current_peer.map_or(true, |peer| peer == receiver_id) {
                s.current.push(ConversationEntry::Pending { temp_id, draft });
            }
        });
        tracing::debug!(%temp_id, receiver_id, "Message queued");

        let body = NewMessage {
            receiver_id,
            content: content.to_string(),
            ride_id,
        };

        match self.api.send(&body).await {
            Ok(message) => {
                self.state.update(|s| {
                    Self::settle(s, temp_id, |st| st.confirm(message.id));
                    if let Some(entry) = s
                        .current
                        .iter_mut()
                        .find(|e| e.temp_id() == Some(temp_id))
                    {
                        *entry = ConversationEntry::Delivered(message.clone());
                    }
                    Self::record_last_message(s, receiver_id, ride_id, &message);
                });
                self.state.finish();
                tracing::info!(%temp_id, id = message.id, "Message delivered");
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(%temp_id, error = %e, "Message rolled back");
                self.state.update(|s| {
                    Self::settle(s, temp_id, SendState::roll_back);
                    s.current.retain(|e| e.temp_id() != Some(temp_id));
                });
                self.state.fail(&e);
                self.ctx.notify_failure("Message not sent", &e);
                Err(e)
            }
        }
    }

    fn settle(s: &mut MessageState, temp_id: TempId, step: impl FnOnce(SendState) -> SendState) {
        if let Some(st) = s.sends.get_mut(&temp_id) {
            *st = step(*st);
        }
        Self::prune_settled(&mut s.sends);
    }

    fn prune_settled(sends: &mut HashMap<TempId, SendState>) {
        let mut settled: Vec<TempId> = sends
            .iter()
            .filter(|(_, st)| st.is_settled())
            .map(|(id, _)| *id)
            .collect();
        if settled.len() <= SETTLED_SEND_HISTORY {
            return;
        }
        settled.sort_unstable();
        let excess = settled.len() - SETTLED_SEND_HISTORY;
        for id in &settled[..excess] {
            sends.remove(id);
        }
    }

    /// Point the peer's conversation at `message`, or start one at the top.
    fn record_last_message(
        s: &mut MessageState,
        receiver_id: i64,
        ride_id: Option<i64>,
        message: &Message,
    ) {
        if let Some(conv) = s
            .conversations
            .iter_mut()
            .find(|c| c.peer_id() == receiver_id)
        {
            conv.last_message = message.clone();
            return;
        }

        let user = message
            .receiver
            .clone()
            .filter(|u| u.id == receiver_id)
            .unwrap_or_else(|| UserSummary {
                id: receiver_id,
                name: UNKNOWN_PEER_NAME.to_string(),
                photo_url: None,
                phone: None,
            });
        s.conversations.insert(
            0,
            Conversation {
                id: message.id,
                user,
                last_message: message.clone(),
                unread_count: 0,
                ride_id,
            },
        );
    }
}
