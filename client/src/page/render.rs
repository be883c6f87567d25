//! Markup for one received chat message.
//!
//! TRADE-OFFS
//! ==========
//! `Raw` places server-provided text into markup as-is, the way the host page
//! has always rendered chat. Whether the server sanitizes message content is
//! outside this crate; `Escaped` exists for deployments that want the widget
//! to do it instead.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use frames::events::ChatMessage;

/// Class of the wrapper element around each message block.
pub const MESSAGE_BLOCK_CLASS: &str = "mb-2";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkupMode {
    /// Insert fields verbatim.
    #[default]
    Raw,
    /// HTML-escape fields before insertion.
    Escaped,
}

/// One display block: bold username, message body, muted timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBlock {
    pub message: ChatMessage,
    pub mode: MarkupMode,
}

impl MessageBlock {
    #[must_use]
    pub fn new(message: ChatMessage, mode: MarkupMode) -> Self {
        Self { message, mode }
    }

    /// Inner markup of the block; the wrapper carries [`MESSAGE_BLOCK_CLASS`].
    #[must_use]
    pub fn markup(&self) -> String {
        let field = |text: &str| match self.mode {
            MarkupMode::Raw => text.to_owned(),
            MarkupMode::Escaped => escape_html(text),
        };
        format!(
            "<strong>{}:</strong><p class=\"mb-0\">{}</p><small class=\"text-muted\">{}</small>",
            field(&self.message.username),
            field(&self.message.msg),
            field(&self.message.timestamp),
        )
    }
}

/// Escape text for safe placement in element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
