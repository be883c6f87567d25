//! WebSocket frame client for the chat channel.
//!
//! The frame client owns the connection lifecycle: connect, join through the
//! page controller, pump frames both ways, and reconnect with exponential
//! backoff after a drop. Each successful connect calls `ChatPage::on_connect`,
//! so the room is joined again after every reconnect.
//!
//! ORDERING
//! ========
//! Nothing is taken off the outbound queue until the socket is open. A failed
//! attempt never reaches `on_connect`, so it neither joins nor loses queued
//! frames. Once open, the fresh `join` goes out first, then whatever was
//! queued while offline, then live traffic.
//!
//! The browser socket is gated behind `#[cfg(feature = "hydrate")]`;
//! [`run_connection`] and the URL and decode helpers are plain functions.

#[cfg(test)]
#[path = "frame_client_test.rs"]
mod frame_client_test;

use std::cell::RefCell;
use std::fmt::Display;

use futures::channel::mpsc::UnboundedReceiver;
use futures::future::{Either, poll_fn, select};
use futures::{Sink, SinkExt, Stream, StreamExt};

use crate::error::ConnectionError;
use crate::net::types::Frame;
use crate::page::{ChatDom, ChatPage, Emitter};

/// One message read off the socket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Bytes(Vec<u8>),
}

/// Build the WebSocket URL for `path` on the page's own host.
///
/// Pages served over `https` get `wss`.
pub fn ws_url(page_href: &str, host: &str, path: &str) -> String {
    let proto = if page_href.starts_with("https") { "wss" } else { "ws" };
    let host = if host.is_empty() { "localhost:5000" } else { host };
    format!("{proto}://{host}{path}")
}

/// Decode one inbound JSON text message, logging and dropping garbage.
pub fn decode_text(text: &str) -> Option<Frame> {
    match frames::decode_json(text) {
        Ok(frame) => Some(frame),
        Err(e) => {
            log::warn!("chat: undecodable text frame: {e}");
            None
        }
    }
}

/// Decode one inbound protobuf message, logging and dropping garbage.
pub fn decode_bytes(bytes: &[u8]) -> Option<Frame> {
    match frames::decode_frame(bytes) {
        Ok(frame) => Some(frame),
        Err(e) => {
            log::warn!("chat: undecodable binary frame: {e}");
            None
        }
    }
}

/// Drive one socket session from handshake to close.
///
/// Waits for `write` to become ready before joining; if `read` ends or fails
/// first the attempt is abandoned with the queue untouched. Returns `Ok` when
/// the server closes the stream.
///
/// # Errors
///
/// Returns [`ConnectionError::NeverOpened`] if the socket closed before
/// opening and [`ConnectionError::Socket`] for socket failures.
pub async fn run_connection<D, E, W, R, RE>(
    page: &RefCell<ChatPage<D, E>>,
    mut write: W,
    mut read: R,
    rx: &mut UnboundedReceiver<String>,
) -> Result<(), ConnectionError>
where
    D: ChatDom,
    E: Emitter,
    W: Sink<String> + Unpin,
    W::Error: Display,
    R: Stream<Item = Result<Inbound, RE>> + Unpin,
    RE: Display,
{
    match select(poll_fn(|cx| write.poll_ready_unpin(cx)), read.next()).await {
        Either::Left((ready, _)) => ready.map_err(socket_error)?,
        Either::Right((Some(Err(e)), _)) => return Err(socket_error(e)),
        Either::Right(_) => return Err(ConnectionError::NeverOpened),
    }

    let backlog = drain(rx);
    page.borrow_mut().on_connect();
    for text in drain(rx).into_iter().chain(backlog) {
        write.send(text).await.map_err(socket_error)?;
    }

    let send_task = async {
        while let Some(text) = rx.next().await {
            write.send(text).await.map_err(socket_error)?;
        }
        Ok::<(), ConnectionError>(())
    };

    let recv_task = async {
        while let Some(message) = read.next().await {
            let frame = match message.map_err(socket_error)? {
                Inbound::Text(text) => decode_text(&text),
                Inbound::Bytes(bytes) => decode_bytes(&bytes),
            };
            if let Some(frame) = frame {
                page.borrow_mut().dispatch(&frame);
            }
        }
        Ok::<(), ConnectionError>(())
    };

    match select(Box::pin(send_task), Box::pin(recv_task)).await {
        Either::Left((done, _)) | Either::Right((done, _)) => done,
    }
}

/// Everything queued right now, without waiting.
fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(Some(text)) = rx.try_next() {
        out.push(text);
    }
    out
}

fn socket_error(e: impl Display) -> ConnectionError {
    ConnectionError::Socket(e.to_string())
}

#[cfg(feature = "hydrate")]
pub use browser::spawn_frame_client;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::pin::pin;
    use std::rc::Rc;

    use futures::channel::mpsc::UnboundedReceiver;
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::futures::WebSocket;
    use gloo_net::websocket::{Message, WebSocketError};

    use super::{Inbound, run_connection};
    use crate::error::ConnectionError;
    use crate::net::backoff::Backoff;
    use crate::net::sender::FrameSender;
    use crate::page::{ChatDom, ChatPage};

    type SharedPage<D> = Rc<RefCell<ChatPage<D, FrameSender>>>;

    /// Spawn the WebSocket lifecycle as a local async task.
    ///
    /// `rx` is the receiving end of the channel behind the page's
    /// [`FrameSender`].
    pub fn spawn_frame_client<D: ChatDom + 'static>(
        page: SharedPage<D>,
        url: String,
        backoff: Backoff,
        rx: UnboundedReceiver<String>,
    ) {
        wasm_bindgen_futures::spawn_local(frame_client_loop(page, url, backoff, rx));
    }

    /// Main connection loop with reconnect logic.
    async fn frame_client_loop<D: ChatDom + 'static>(
        page: SharedPage<D>,
        url: String,
        backoff: Backoff,
        mut rx: UnboundedReceiver<String>,
    ) {
        let mut delay_ms = backoff.initial_ms;

        loop {
            page.borrow_mut().on_connecting();

            match connect_and_run(&url, &page, &mut rx).await {
                Ok(()) => {
                    log::info!("chat: websocket closed");
                    delay_ms = backoff.initial_ms;
                }
                Err(e) => log::warn!("chat: websocket error: {e}"),
            }

            page.borrow_mut().on_disconnect();

            gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(delay_ms))).await;
            delay_ms = backoff.next(delay_ms);
        }
    }

    /// Open the socket and hand it to [`run_connection`].
    async fn connect_and_run<D: ChatDom + 'static>(
        url: &str,
        page: &SharedPage<D>,
        rx: &mut UnboundedReceiver<String>,
    ) -> Result<(), ConnectionError> {
        let ws = WebSocket::open(url).map_err(|e| ConnectionError::Socket(e.to_string()))?;
        let (ws_write, ws_read) = ws.split();

        let write = pin!(ws_write.with(|text: String| async move { Ok::<_, WebSocketError>(Message::Text(text)) }));
        let read = pin!(ws_read.map(|message| {
            message.map(|message| match message {
                Message::Text(text) => Inbound::Text(text),
                Message::Bytes(bytes) => Inbound::Bytes(bytes),
            })
        }));

        run_connection(&**page, write, read, rx).await
    }
}
