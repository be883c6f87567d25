//! # client
//!
//! Chat widget for the request details page. It binds to the server-rendered
//! chat markup, joins the request's room over a WebSocket, renders incoming
//! messages, sends outgoing ones, and relays status-change clicks.
//!
//! The page controller (`page`) is plain Rust and runs anywhere; the
//! browser binding (`web`) and the socket loop are behind the `hydrate`
//! feature.

pub mod config;
pub mod error;
pub mod net;
pub mod page;
pub mod state;
pub mod util;
#[cfg(feature = "hydrate")]
pub mod web;

/// WASM entry point: install logging and mount the widget.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("chat: logger unavailable: {e}").into());
    }

    if let Err(e) = web::start() {
        log::error!("chat: widget not mounted: {e}");
    }
}
