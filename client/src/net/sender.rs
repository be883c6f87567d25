//! Outbound frame queue.
//!
//! The page controller never touches the socket. It pushes JSON text into an
//! unbounded channel; the frame client drains that channel into whichever
//! connection is currently open, so frames queued while reconnecting go out
//! after the next connect.

#[cfg(test)]
#[path = "sender_test.rs"]
mod sender_test;

use futures::channel::mpsc::UnboundedSender;

use crate::net::types::Frame;
use crate::page::dom::Emitter;

#[derive(Clone, Debug, Default)]
pub struct FrameSender {
    tx: Option<UnboundedSender<String>>,
}

impl FrameSender {
    #[must_use]
    pub fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Send a frame to the server via the shared channel.
    ///
    /// Returns `false` if there is no channel or it has been closed.
    pub fn send(&self, frame: &Frame) -> bool {
        let Some(tx) = &self.tx else {
            return false;
        };
        match frames::encode_json(frame) {
            Ok(json) => tx.unbounded_send(json).is_ok(),
            Err(e) => {
                log::warn!("chat: failed to encode `{}` frame: {e}", frame.event);
                false
            }
        }
    }
}

impl Emitter for FrameSender {
    fn emit(&self, frame: &Frame) -> bool {
        self.send(frame)
    }
}
