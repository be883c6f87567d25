//! Browser binding: resolve the page's elements, build the controller, wire
//! DOM listeners, and start the frame client.
//!
//! LIFECYCLE
//! =========
//! 1. Wait for `DOMContentLoaded` if the document is still loading.
//! 2. Resolve required elements; any missing one aborts the mount.
//! 3. Wire the send button, Enter key, and every status control present now.
//!    Controls added to the page later are not wired.
//! 4. Spawn the WebSocket loop; it joins the room on every connect.

mod dom;
mod listeners;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::config::ChatConfig;
use crate::error::MountError;
use crate::net::frame_client::{spawn_frame_client, ws_url};
use crate::net::sender::FrameSender;
use crate::page::dom::{
    CHAT_CONTAINER_ID, CHAT_MESSAGES_ID, MESSAGE_INPUT_ID, REQUEST_ID_ATTR, REQUEST_STATUS_ID, SEND_BUTTON_ID,
    document_is_loading,
};
use crate::page::{ChatPage, RequestId};

pub use dom::WebDom;

/// Page controller as shared by listeners and the frame client.
pub type SharedPage = Rc<RefCell<ChatPage<WebDom, FrameSender>>>;

/// Mount the widget once the document is ready.
///
/// # Errors
///
/// Returns [`MountError`] when there is no document or the ready listener
/// cannot be bound. Errors from the deferred mount itself are logged.
pub fn start() -> Result<(), MountError> {
    let window = web_sys::window().ok_or(MountError::MissingWindow)?;
    let document = window.document().ok_or(MountError::MissingDocument)?;

    if document_is_loading(&document.ready_state()) {
        listeners::once_ready(&document, || {
            if let Err(e) = mount() {
                log::error!("chat: widget not mounted: {e}");
            }
        })
    } else {
        mount().map(|_| ())
    }
}

/// Bind the widget to the current page.
///
/// # Errors
///
/// Returns [`MountError`] if a required element or the request id is
/// missing, or a listener cannot be bound.
pub fn mount() -> Result<SharedPage, MountError> {
    let window = web_sys::window().ok_or(MountError::MissingWindow)?;
    let document = window.document().ok_or(MountError::MissingDocument)?;

    let container = element_by_id(&document, CHAT_CONTAINER_ID)?;
    let request_id = RequestId::from_attr(container.get_attribute(REQUEST_ID_ATTR))?;
    let config = ChatConfig::from_attrs(|name| container.get_attribute(name));

    let input: HtmlInputElement = typed_by_id(&document, MESSAGE_INPUT_ID)?;
    let send_button = element_by_id(&document, SEND_BUTTON_ID)?;
    let messages: HtmlElement = typed_by_id(&document, CHAT_MESSAGES_ID)?;
    let status = document.get_element_by_id(REQUEST_STATUS_ID);

    let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
    let dom = WebDom { document: document.clone(), container, input: input.clone(), messages, status };
    let page: SharedPage = Rc::new(RefCell::new(ChatPage::new(request_id, config.clone(), dom, FrameSender::new(tx))));

    listeners::bind_send_button(&send_button, &page)?;
    listeners::bind_enter_key(&input, &page)?;
    let wired = listeners::bind_status_controls(&document, &page)?;

    let location = window.location();
    let href = location.href().unwrap_or_default();
    let host = location.host().unwrap_or_default();
    let url = ws_url(&href, &host, &config.ws_path);

    log::info!("chat: mounted for request {} ({wired} status controls), connecting to {url}", page.borrow().request_id());
    spawn_frame_client(Rc::clone(&page), url, config.backoff, rx);

    Ok(page)
}

fn element_by_id(document: &Document, id: &'static str) -> Result<Element, MountError> {
    document.get_element_by_id(id).ok_or(MountError::MissingElement(id))
}

fn typed_by_id<T: JsCast>(document: &Document, id: &'static str) -> Result<T, MountError> {
    element_by_id(document, id)?
        .dyn_into::<T>()
        .map_err(|_| MountError::WrongElementType(id))
}
