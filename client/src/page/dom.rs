//! DOM contract between the widget and the server-rendered request page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host template renders the chat markup; the widget only looks elements
//! up by these identifiers once, at mount time. `ChatDom` is the seam the
//! controller writes through, so the browser binding and the terminal client
//! each supply their own element handles.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use frames::Frame;

use crate::page::render::MessageBlock;
use crate::state::chat::ConnectionStatus;

/// Container carrying the request identifier and optional config attributes.
pub const CHAT_CONTAINER_ID: &str = "chat-container";
pub const MESSAGE_INPUT_ID: &str = "message-input";
pub const SEND_BUTTON_ID: &str = "send-button";
pub const CHAT_MESSAGES_ID: &str = "chat-messages";
/// Optional; status updates are skipped when the page has none.
pub const REQUEST_STATUS_ID: &str = "request-status";
/// Status-change controls, wired once at mount time.
pub const STATUS_CHANGE_SELECTOR: &str = ".status-change-btn";

pub const REQUEST_ID_ATTR: &str = "data-request-id";
pub const STATUS_ATTR: &str = "data-status";
pub const CONNECTION_STATUS_ATTR: &str = "data-connection-status";

pub const ENTER_KEY: &str = "Enter";

/// `document.readyState` before `DOMContentLoaded` has fired.
pub const LOADING_READY_STATE: &str = "loading";

/// Whether mounting has to wait for `DOMContentLoaded`.
#[must_use]
pub fn document_is_loading(ready_state: &str) -> bool {
    ready_state == LOADING_READY_STATE
}

/// Element handles the controller reads and writes.
pub trait ChatDom {
    /// Current text of the message input.
    fn input_value(&self) -> String;

    fn set_input_value(&mut self, value: &str);

    /// Append one block to the end of the message list.
    fn append_message(&mut self, block: &MessageBlock);

    /// Scroll the message list to its maximum scroll offset.
    fn scroll_messages_to_bottom(&mut self);

    /// Replace the status display text. Returns `false` when the page has no
    /// status display.
    fn set_status_text(&mut self, status: &str) -> bool;

    fn set_connection_status(&mut self, _status: ConnectionStatus) {}
}

/// Outbound half of the real-time connection.
pub trait Emitter {
    /// Queue a frame for delivery. Fire-and-forget: no acknowledgement.
    ///
    /// Returns `false` when the frame could not even be queued.
    fn emit(&self, frame: &Frame) -> bool;
}
