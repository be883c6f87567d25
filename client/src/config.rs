//! Widget configuration resolved from the host page.
//!
//! The server-rendered template may tune the widget through optional data
//! attributes on `#chat-container`; everything has a default so a bare
//! container with only `data-request-id` works.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::net::backoff::Backoff;
use crate::page::render::MarkupMode;

/// Path of the chat WebSocket endpoint on the page's own host.
pub const DEFAULT_WS_PATH: &str = "/ws";

pub const WS_PATH_ATTR: &str = "data-ws-path";
pub const ESCAPE_MARKUP_ATTR: &str = "data-escape-markup";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatConfig {
    /// Endpoint path, joined to the page's scheme and host.
    pub ws_path: String,
    /// How received message fields are placed into markup.
    pub markup: MarkupMode,
    pub backoff: Backoff,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { ws_path: DEFAULT_WS_PATH.to_owned(), markup: MarkupMode::Raw, backoff: Backoff::default() }
    }
}

impl ChatConfig {
    /// Resolve configuration from container attributes via `attr(name)`.
    pub fn from_attrs(attr: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = attr(WS_PATH_ATTR) {
            let path = path.trim();
            if !path.is_empty() {
                config.ws_path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
            }
        }

        if let Some(flag) = attr(ESCAPE_MARKUP_ATTR) {
            if matches!(flag.trim(), "true" | "1" | "") {
                config.markup = MarkupMode::Escaped;
            }
        }

        config
    }
}
