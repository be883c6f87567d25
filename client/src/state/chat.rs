#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use frames::events::ChatMessage;

/// State for one request's chat panel.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    /// Received messages in arrival order. Never trimmed.
    pub messages: Vec<ChatMessage>,
    /// Last status text received, if any. Last writer wins.
    pub status: Option<String>,
    /// Current WebSocket connection lifecycle state.
    pub connection_status: ConnectionStatus,
    /// Number of `join` events emitted, one per successful connect.
    pub joins: u32,
}

/// WebSocket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Not connected; socket is closed or not yet opened.
    #[default]
    Disconnected,
    /// WebSocket handshake is in progress.
    Connecting,
    /// WebSocket is open and the room join has been sent.
    Connected,
}

impl ConnectionStatus {
    /// Lowercase label used for the container's `data-connection-status`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}
