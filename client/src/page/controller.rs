//! Page controller: one per page load.
//!
//! LIFECYCLE
//! =========
//! 1. Mount builds the controller; the message list scrolls to the bottom.
//! 2. Every successful connect emits `join` for the request's room. There is
//!    no once-only guard, so a reconnect joins again.
//! 3. DOM events (send click, Enter, status controls) emit outbound events.
//! 4. Inbound frames are routed by event name through `dispatch`.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use frames::Frame;
use frames::events::{ChangeStatus, ChatEvent, ChatMessage, EventError, JoinRoom, SendMessage, StatusUpdated};

use crate::config::ChatConfig;
use crate::page::dom::{ChatDom, ENTER_KEY, Emitter};
use crate::page::render::MessageBlock;
use crate::page::request_id::RequestId;
use crate::state::chat::{ChatState, ConnectionStatus};
use crate::util::frame::request_frame;

pub struct ChatPage<D, E> {
    request_id: RequestId,
    config: ChatConfig,
    dom: D,
    emitter: E,
    state: ChatState,
}

impl<D: ChatDom, E: Emitter> ChatPage<D, E> {
    /// Build the controller and scroll the message list to the newest entry.
    pub fn new(request_id: RequestId, config: ChatConfig, dom: D, emitter: E) -> Self {
        let mut page = Self { request_id, config, dom, emitter, state: ChatState::default() };
        page.dom.scroll_messages_to_bottom();
        page
    }

    /// Room key attached to every outbound event.
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Settings resolved at mount time.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// What the panel currently shows, mirrored in plain Rust.
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// Element handles the controller writes through.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Element handles, for front-ends that feed the input themselves.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Outbound connection handle.
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    // =========================================================================
    // CONNECTION
    // =========================================================================

    /// A connection attempt has started.
    pub fn on_connecting(&mut self) {
        self.set_connection_status(ConnectionStatus::Connecting);
    }

    /// Join the request's room. Runs on every successful connect.
    pub fn on_connect(&mut self) -> bool {
        self.set_connection_status(ConnectionStatus::Connected);
        let join = ChatEvent::Join(JoinRoom { room: self.request_id.as_str().to_owned() });
        let sent = self.emit(&join);
        if sent {
            self.state.joins = self.state.joins.saturating_add(1);
        }
        log::info!("chat: connected, join room {} sent={sent}", self.request_id);
        sent
    }

    /// The socket closed or failed.
    pub fn on_disconnect(&mut self) {
        self.set_connection_status(ConnectionStatus::Disconnected);
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.state.connection_status = status;
        self.dom.set_connection_status(status);
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Send the input's text if it is not blank, then clear the input.
    ///
    /// The message goes out untrimmed. Blank input is left untouched.
    pub fn on_send(&mut self) -> bool {
        let msg = self.dom.input_value();
        if is_blank(&msg) {
            return false;
        }

        let event = ChatEvent::SendMessage(SendMessage { msg, request_id: self.request_id.as_str().to_owned() });
        if !self.emit(&event) {
            log::warn!("chat: send_message could not be queued");
        }
        self.dom.set_input_value("");
        true
    }

    /// Key press inside the message input. Enter behaves like the send button.
    pub fn on_input_key(&mut self, key: &str) -> bool {
        if key == ENTER_KEY { self.on_send() } else { false }
    }

    /// A status-change control was clicked with its `data-status` value.
    ///
    /// A control without the attribute still emits, with no status.
    pub fn on_status_click(&mut self, status: Option<&str>) -> bool {
        let event = ChatEvent::ChangeStatus(ChangeStatus {
            request_id: self.request_id.as_str().to_owned(),
            status: status.map(ToOwned::to_owned),
        });
        self.emit(&event)
    }

    fn emit(&self, event: &ChatEvent) -> bool {
        let frame = request_frame(event, &self.request_id);
        self.emitter.emit(&frame)
    }

    // =========================================================================
    // INBOUND
    // =========================================================================

    /// Route one inbound frame by event name.
    pub fn dispatch(&mut self, frame: &Frame) {
        match ChatEvent::from_frame(frame) {
            Ok(ChatEvent::ReceiveMessage(message)) => self.on_receive_message(message),
            Ok(ChatEvent::StatusUpdated(update)) => {
                self.on_status_updated(update);
            }
            Ok(other) => log::debug!("chat: ignoring inbound `{}`", other.name()),
            Err(EventError::UnknownEvent(name)) => log::debug!("chat: ignoring unknown event `{name}`"),
            Err(e) => log::warn!("chat: dropped inbound frame: {e}"),
        }
    }

    /// Append the message to the list and scroll to the newest entry.
    pub fn on_receive_message(&mut self, message: ChatMessage) {
        let block = MessageBlock::new(message, self.config.markup);
        self.dom.append_message(&block);
        self.dom.scroll_messages_to_bottom();
        self.state.messages.push(block.message);
    }

    /// Show the new status if the page has a status display.
    ///
    /// No room check: whatever status arrives on this connection wins.
    pub fn on_status_updated(&mut self, update: StatusUpdated) -> bool {
        let shown = self.dom.set_status_text(&update.status);
        self.state.status = Some(update.status);
        shown
    }
}

/// Blank the way a browser's `String.prototype.trim` sees it: Unicode
/// whitespace except U+0085, plus the byte-order mark.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}
