//! Errors raised while binding the widget to the host page.

/// Why the chat widget could not attach to the page.
///
/// The host template owns the markup; any of these means the page does not
/// match the DOM contract in [`crate::page::dom`].
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no browser window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("required element `#{0}` not found")]
    MissingElement(&'static str),
    #[error("element `#{0}` has the wrong type")]
    WrongElementType(&'static str),
    #[error("`#chat-container` has no `data-request-id`")]
    MissingRequestId,
    #[error("failed to bind `{event}` listener: {message}")]
    Listener { event: &'static str, message: String },
}

/// Why one WebSocket session ended with an error.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("socket closed before the handshake completed")]
    NeverOpened,
    #[error("websocket error: {0}")]
    Socket(String),
}
