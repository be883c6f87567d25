//! One WebSocket session: pump frames between the socket, the controller,
//! and stdin until the socket closes or the user quits.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::Write;

use client::net::frame_client::{decode_bytes, decode_text};
use client::page::{ChatDom, ChatPage, Emitter};
use frames::Frame;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::CliError;
use crate::terminal::{Command, TerminalDom, parse_command};

/// Wire encoding for outbound frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    Json,
    Binary,
}

impl Codec {
    /// Encode one frame as a WebSocket message.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Encode`] if the JSON payload cannot be rendered.
    pub fn encode(self, frame: &Frame) -> Result<Message, CliError> {
        Ok(match self {
            Self::Json => Message::Text(frames::encode_json(frame)?.into()),
            Self::Binary => Message::Binary(frames::encode_frame(frame).into()),
        })
    }
}

/// Decode one inbound message; control frames and garbage yield `None`.
pub fn decode(message: &Message) -> Option<Frame> {
    match message {
        Message::Text(text) => decode_text(text.as_str()),
        Message::Binary(bytes) => decode_bytes(bytes),
        _ => None,
    }
}

/// Outbound queue that outlives any single connection.
#[derive(Clone)]
pub struct ChannelEmitter {
    tx: UnboundedSender<Frame>,
}

impl ChannelEmitter {
    pub fn new(tx: UnboundedSender<Frame>) -> Self {
        Self { tx }
    }
}

impl Emitter for ChannelEmitter {
    fn emit(&self, frame: &Frame) -> bool {
        self.tx.send(frame.clone()).is_ok()
    }
}

/// How a session ended.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server closed the socket; reconnect.
    Closed,
    /// `/quit` or end of input; exit.
    Quit,
}

pub type TerminalPage<W> = ChatPage<TerminalDom<W>, ChannelEmitter>;

/// Join the room on a fresh connection. Frames queued while offline are put
/// back behind the `join`.
pub fn join_room<W: Write>(page: &mut TerminalPage<W>, outbound: &mut UnboundedReceiver<Frame>) {
    let mut backlog = Vec::new();
    while let Ok(frame) = outbound.try_recv() {
        backlog.push(frame);
    }
    page.on_connect();
    for frame in backlog {
        if !page.emitter().emit(&frame) {
            warn!("outbound queue closed");
            break;
        }
    }
}

/// Apply one line of user input to the page.
pub fn apply_line<W: Write>(page: &mut TerminalPage<W>, line: &str) -> Option<SessionEnd> {
    match parse_command(line) {
        Command::Quit => return Some(SessionEnd::Quit),
        Command::Status(status) => {
            page.on_status_click(Some(&status));
        }
        Command::Send(text) => {
            page.dom_mut().set_input_value(&text);
            if !page.on_send() {
                debug!("blank line not sent");
            }
        }
    }
    None
}

/// Run until the socket closes or the user quits.
///
/// # Errors
///
/// Returns [`CliError::Ws`] on socket failures, [`CliError::Stdin`] on input
/// failures, and [`CliError::Encode`] for frames that cannot be encoded.
pub async fn run_session<S, W, R>(
    mut stream: S,
    page: &mut TerminalPage<W>,
    outbound: &mut UnboundedReceiver<Frame>,
    lines: &mut Lines<R>,
    codec: Codec,
) -> Result<SessionEnd, CliError>
where
    S: futures_util::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>>
        + futures_util::Sink<Message, Error = tokio_tungstenite::tungstenite::Error>
        + Unpin,
    W: Write,
    R: AsyncBufRead + Unpin,
{
    loop {
        tokio::select! {
            inbound = stream.next() => {
                let Some(inbound) = inbound else {
                    return Ok(SessionEnd::Closed);
                };
                let message = inbound.map_err(|e| CliError::Ws(Box::new(e)))?;
                if message.is_close() {
                    info!("server closed the connection");
                    return Ok(SessionEnd::Closed);
                }
                if let Some(frame) = decode(&message) {
                    page.dispatch(&frame);
                }
            }
            frame = outbound.recv() => {
                let Some(frame) = frame else {
                    return Ok(SessionEnd::Quit);
                };
                debug!(event = %frame.event, "send frame");
                stream.send(codec.encode(&frame)?).await.map_err(|e| CliError::Ws(Box::new(e)))?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(SessionEnd::Quit);
                };
                if let Some(end) = apply_line(page, &line) {
                    return Ok(end);
                }
            }
        }
    }
}
