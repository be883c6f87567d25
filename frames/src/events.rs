//! Typed chat events carried inside [`Frame`]s.
//!
//! DESIGN
//! ======
//! Outbound payloads (`join`, `send_message`, `change_status`) are built by
//! this side and serialize strictly. Inbound payloads (`receive_message`,
//! `status_updated`) come from the server unvalidated: a missing field is not
//! an error, it reads as the literal text `undefined` so the page shows what
//! arrived instead of dropping the event.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Frame;

/// Client → server: join the room for one request.
pub const JOIN: &str = "join";
/// Server → client: a chat message was posted in the room.
pub const RECEIVE_MESSAGE: &str = "receive_message";
/// Client → server: post a chat message.
pub const SEND_MESSAGE: &str = "send_message";
/// Client → server: ask for the request status to change.
pub const CHANGE_STATUS: &str = "change_status";
/// Server → client: the request status changed.
pub const STATUS_UPDATED: &str = "status_updated";

/// Text shown for a payload field the server left out.
pub const MISSING_FIELD: &str = "undefined";

/// Error returned by [`ChatEvent::from_frame`].
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("unknown chat event: {0}")]
    UnknownEvent(String),
    #[error("invalid `{event}` payload: {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoom {
    pub room: String,
}

/// A chat message as broadcast to the room. Display-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub msg: String,
    pub timestamp: String,
}

impl ChatMessage {
    /// Read a message payload without validating its shape.
    #[must_use]
    pub fn from_payload(data: &Value) -> Self {
        Self {
            username: payload_text(data, "username"),
            msg: payload_text(data, "msg"),
            timestamp: payload_text(data, "timestamp"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    /// Message body exactly as typed, surrounding whitespace included.
    pub msg: String,
    pub request_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatus {
    pub request_id: String,
    /// `None` when the clicked control has no value; the key is then left
    /// out of the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdated {
    pub status: String,
}

impl StatusUpdated {
    /// Read a status payload without validating its shape.
    #[must_use]
    pub fn from_payload(data: &Value) -> Self {
        Self { status: payload_text(data, "status") }
    }
}

/// Every event the chat channel carries, in either direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEvent {
    Join(JoinRoom),
    ReceiveMessage(ChatMessage),
    SendMessage(SendMessage),
    ChangeStatus(ChangeStatus),
    StatusUpdated(StatusUpdated),
}

impl ChatEvent {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => JOIN,
            Self::ReceiveMessage(_) => RECEIVE_MESSAGE,
            Self::SendMessage(_) => SEND_MESSAGE,
            Self::ChangeStatus(_) => CHANGE_STATUS,
            Self::StatusUpdated(_) => STATUS_UPDATED,
        }
    }

    /// JSON payload of the event.
    #[must_use]
    pub fn payload(&self) -> Value {
        // Plain string structs always serialize.
        let value = match self {
            Self::Join(p) => serde_json::to_value(p),
            Self::ReceiveMessage(p) => serde_json::to_value(p),
            Self::SendMessage(p) => serde_json::to_value(p),
            Self::ChangeStatus(p) => serde_json::to_value(p),
            Self::StatusUpdated(p) => serde_json::to_value(p),
        };
        value.unwrap_or(Value::Null)
    }

    /// Wrap the event in a request frame addressed to `room`.
    #[must_use]
    pub fn to_frame(&self, id: impl Into<String>, room: Option<&str>) -> Frame {
        Frame::request(id, self.name(), room, self.payload())
    }

    /// Recover the typed event from a frame.
    ///
    /// Inbound events are read leniently (see module docs); outbound events
    /// must carry every field.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] for names outside the chat
    /// protocol and [`EventError::InvalidPayload`] for a malformed outbound
    /// payload.
    pub fn from_frame(frame: &Frame) -> Result<Self, EventError> {
        match frame.event.as_str() {
            RECEIVE_MESSAGE => Ok(Self::ReceiveMessage(ChatMessage::from_payload(&frame.data))),
            STATUS_UPDATED => Ok(Self::StatusUpdated(StatusUpdated::from_payload(&frame.data))),
            JOIN => strict(JOIN, &frame.data).map(Self::Join),
            SEND_MESSAGE => strict(SEND_MESSAGE, &frame.data).map(Self::SendMessage),
            CHANGE_STATUS => strict(CHANGE_STATUS, &frame.data).map(Self::ChangeStatus),
            other => Err(EventError::UnknownEvent(other.to_owned())),
        }
    }
}

fn strict<T: DeserializeOwned>(event: &'static str, data: &Value) -> Result<T, EventError> {
    serde_json::from_value(data.clone()).map_err(|source| EventError::InvalidPayload { event, source })
}

/// Text of one payload field as a page would print it.
fn payload_text(data: &Value, key: &str) -> String {
    data.get(key).map_or_else(|| MISSING_FIELD.to_owned(), value_text)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { value_text(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// Whole floats print without a fraction, so `2.0` and a protobuf-carried
/// `42` read the same as their integer forms.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 { "0".to_owned() } else { format!("{f:.0}") }
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;
