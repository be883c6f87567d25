//! Terminal stand-in for the page: the typed line is the message input,
//! stdout is the message list and the status display.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::io::Write;

use client::page::ChatDom;
use client::page::render::MessageBlock;
use client::state::chat::ConnectionStatus;

/// One parsed line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Plain text: goes through the send path, blank lines included.
    Send(String),
    /// `/status <value>`: relay a status change.
    Status(String),
    /// `/quit`
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim() == "/quit" {
        return Command::Quit;
    }
    if let Some(status) = line.strip_prefix("/status ") {
        return Command::Status(status.trim().to_owned());
    }
    Command::Send(line.to_owned())
}

pub struct TerminalDom<W: Write> {
    out: W,
    input: String,
}

impl<W: Write> TerminalDom<W> {
    pub fn new(out: W) -> Self {
        Self { out, input: String::new() }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn print(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> ChatDom for TerminalDom<W> {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        value.clone_into(&mut self.input);
    }

    fn append_message(&mut self, block: &MessageBlock) {
        let m = &block.message;
        self.print(&format!("{}: {} ({})", m.username, m.msg, m.timestamp));
    }

    fn scroll_messages_to_bottom(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "terminal flush failed");
        }
    }

    fn set_status_text(&mut self, status: &str) -> bool {
        self.print(&format!("status: {status}"));
        true
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        tracing::debug!(status = status.as_str(), "connection status");
    }
}
