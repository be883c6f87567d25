//! `medicore-chat`: terminal client for a request's chat room.
//!
//! Drives the same page controller as the browser widget: received messages
//! print as `username: msg (timestamp)`, status updates as `status: <value>`.
//! A plain stdin line sends a message, `/status <value>` relays a status
//! change, `/quit` exits.

mod session;
mod terminal;

use std::io;
use std::time::Duration;

use clap::Parser;
use client::config::ChatConfig;
use client::error::MountError;
use client::page::{ChatPage, RequestId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::session::{ChannelEmitter, Codec, SessionEnd, join_room, run_session};
use crate::terminal::TerminalDom;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid request id: {0}")]
    RequestId(#[from] MountError),
    #[error("websocket failed: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("reading stdin failed: {0}")]
    Stdin(#[from] io::Error),
    #[error("frame encode failed: {0}")]
    Encode(#[from] frames::CodecError),
}

#[derive(Parser, Debug)]
#[command(name = "medicore-chat", about = "Chat in a request's room from the terminal")]
struct Cli {
    #[arg(long, env = "MEDICORE_WS_URL", default_value = "ws://127.0.0.1:5000/ws")]
    url: String,

    #[arg(long, env = "MEDICORE_REQUEST_ID")]
    request_id: String,

    #[arg(long, default_value_t = false, help = "Send protobuf frames instead of JSON text")]
    binary: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let request_id = RequestId::from_attr(Some(cli.request_id))?;
    let codec = if cli.binary { Codec::Binary } else { Codec::Json };

    let (tx, mut outbound) = mpsc::unbounded_channel();
    let mut page = ChatPage::new(
        request_id,
        ChatConfig::default(),
        TerminalDom::new(io::stdout()),
        ChannelEmitter::new(tx),
    );
    let backoff = page.config().backoff;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut delay_ms = backoff.initial_ms;

    loop {
        page.on_connecting();
        match connect_async(cli.url.as_str()).await {
            Ok((stream, _)) => {
                info!(url = %cli.url, room = %page.request_id(), "connected");
                delay_ms = backoff.initial_ms;
                join_room(&mut page, &mut outbound);
                match run_session(stream, &mut page, &mut outbound, &mut lines, codec).await {
                    Ok(SessionEnd::Quit) => return Ok(()),
                    Ok(SessionEnd::Closed) => {}
                    Err(CliError::Ws(e)) => warn!(error = %e, "websocket error"),
                    Err(e) => return Err(e),
                }
            }
            Err(e) => warn!(url = %cli.url, error = %e, "connect failed"),
        }
        page.on_disconnect();

        tokio::time::sleep(Duration::from_millis(u64::from(delay_ms))).await;
        delay_ms = backoff.next(delay_ms);
    }
}
