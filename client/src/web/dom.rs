//! `ChatDom` over real page elements.

use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::page::ChatDom;
use crate::page::dom::CONNECTION_STATUS_ATTR;
use crate::page::render::{MESSAGE_BLOCK_CLASS, MessageBlock};
use crate::state::chat::ConnectionStatus;

/// Element handles resolved once at mount time.
pub struct WebDom {
    pub document: Document,
    pub container: Element,
    pub input: HtmlInputElement,
    pub messages: HtmlElement,
    /// `#request-status`, when the page renders one.
    pub status: Option<Element>,
}

impl ChatDom for WebDom {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn append_message(&mut self, block: &MessageBlock) {
        let div = match self.document.create_element("div") {
            Ok(div) => div,
            Err(e) => {
                log::warn!("chat: cannot create message block: {e:?}");
                return;
            }
        };
        div.set_class_name(MESSAGE_BLOCK_CLASS);
        div.set_inner_html(&block.markup());
        if let Err(e) = self.messages.append_child(&div) {
            log::warn!("chat: cannot append message block: {e:?}");
        }
    }

    fn scroll_messages_to_bottom(&mut self) {
        self.messages.set_scroll_top(self.messages.scroll_height());
    }

    fn set_status_text(&mut self, status: &str) -> bool {
        let Some(display) = &self.status else {
            return false;
        };
        display.set_text_content(Some(status));
        true
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        if let Err(e) = self.container.set_attribute(CONNECTION_STATUS_ATTR, status.as_str()) {
            log::debug!("chat: cannot mark connection status: {e:?}");
        }
    }
}
