//! Shared helpers for constructing outbound request frames.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outbound chat event is addressed to the request's room and gets a
//! fresh frame id. Centralizing the envelope keeps call sites from drifting.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use frames::Frame;
use frames::events::ChatEvent;

use crate::page::request_id::RequestId;

/// Build a request frame for `event` in the room of `request_id`.
pub fn request_frame(event: &ChatEvent, request_id: &RequestId) -> Frame {
    event.to_frame(uuid::Uuid::new_v4().to_string(), Some(request_id.as_str()))
}
