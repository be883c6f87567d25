//! Networking modules for the chat frame protocol.
//!
//! SYSTEM CONTEXT
//! ==============
//! `frame_client` manages the websocket lifecycle, `sender` is the outbound
//! queue handed to the page controller, `backoff` holds the reconnect
//! policy, and `types` re-exports the shared wire schema.

pub mod backoff;
pub mod frame_client;
pub mod sender;
pub mod types;
