//! Client-side state mirrored from what the chat panel shows.
//!
//! DESIGN
//! ======
//! The DOM is the source of truth for the page; `ChatState` keeps the same
//! facts in plain Rust so the terminal client and tests can read them back.

pub mod chat;
