//! Shared wire-protocol types for the client/server boundary.
//!
//! The definitions live in the `frames` crate so the terminal client speaks
//! exactly the same schema.

pub use frames::Frame;
pub use frames::Status as FrameStatus;
pub use frames::events::{ChangeStatus, ChatEvent, ChatMessage, JoinRoom, SendMessage, StatusUpdated};
