//! Chat with the book assistant
//!
//! The user's turn is appended as soon as it is sent, before the backend
//! answers. Every user turn later receives exactly one assistant turn: the
//! backend's reply, or [`APOLOGY`] if the request failed.

use std::collections::HashSet;

use uuid::Uuid;

use crate::backend::{BackendClient, ChatRequest};

/// Reply shown in place of an answer when the request failed
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(Uuid);

impl TurnId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub id: TurnId,
    pub role: Role,
    pub text: String,
    /// For assistant turns, the user turn being answered
    pub in_reply_to: Option<TurnId>,
}

/// One sent message, ready to go to the backend
#[derive(Debug, Clone)]
pub struct ChatCall {
    turn: TurnId,
    request: ChatRequest,
}

impl ChatCall {
    /// The user turn this call will answer
    pub fn turn(&self) -> TurnId {
        self.turn
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    pub async fn run(self, client: BackendClient) -> ChatDone {
        let reply = match client.chat(&self.request).await {
            Ok(response) => Ok(response.response),
            Err(e) => Err(e.to_string()),
        };
        ChatDone {
            turn: self.turn,
            reply,
        }
    }
}

/// Completion of a [`ChatCall`]
#[derive(Debug, Clone)]
pub struct ChatDone {
    turn: TurnId,
    reply: Result<String, String>,
}

impl ChatDone {
    pub fn turn(&self) -> TurnId {
        self.turn
    }

    pub fn is_success(&self) -> bool {
        self.reply.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct ChatController {
    transcript: Vec<ChatTurn>,
    input: String,
    awaiting: HashSet<TurnId>,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Contents of the message box
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    /// Number of user turns still waiting for a reply
    pub fn awaiting_reply(&self) -> usize {
        self.awaiting.len()
    }

    /// Send whatever is in the message box
    pub fn send_input(&mut self) -> Option<ChatCall> {
        let message = std::mem::take(&mut self.input);
        let call = self.send(&message);
        if call.is_none() {
            // Whitespace-only input stays where the user left it
            self.input = message;
        }
        call
    }

    /// Append the user's turn and return the request for its reply.
    ///
    /// Blank messages are ignored.
    pub fn send(&mut self, message: &str) -> Option<ChatCall> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let turn = TurnId::new();
        self.transcript.push(ChatTurn {
            id: turn,
            role: Role::User,
            text: message.to_string(),
            in_reply_to: None,
        });
        self.input.clear();
        self.awaiting.insert(turn);
        tracing::info!("Sending chat message ({} chars)", message.len());

        Some(ChatCall {
            turn,
            request: ChatRequest {
                message: message.to_string(),
            },
        })
    }

    /// Append the reply for a finished call. Returns `false` if that turn
    /// was already answered.
    pub fn finish(&mut self, done: ChatDone) -> bool {
        if !self.awaiting.remove(&done.turn) {
            tracing::warn!("Ignoring reply for a turn that is not awaiting one");
            return false;
        }

        let text = match done.reply {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                APOLOGY.to_string()
            }
        };

        self.transcript.push(ChatTurn {
            id: TurnId::new(),
            role: Role::Assistant,
            text,
            in_reply_to: Some(done.turn),
        });
        true
    }
}
