use std::cell::RefCell;

use super::*;
use frames::events::{CHANGE_STATUS, JOIN, RECEIVE_MESSAGE, SEND_MESSAGE, STATUS_UPDATED};

use crate::page::render::MarkupMode;

// =============================================================
// Fakes
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Op {
    Append(String),
    Scroll,
}

#[derive(Default)]
struct FakeDom {
    input: String,
    ops: Vec<Op>,
    status_display: Option<String>,
    connection: Vec<ConnectionStatus>,
}

impl FakeDom {
    fn with_status_display() -> Self {
        Self { status_display: Some("Pending".to_owned()), ..Self::default() }
    }

    fn appended(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Append(markup) => Some(markup.as_str()),
                Op::Scroll => None,
            })
            .collect()
    }
}

impl ChatDom for FakeDom {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_owned();
    }

    fn append_message(&mut self, block: &MessageBlock) {
        self.ops.push(Op::Append(block.markup()));
    }

    fn scroll_messages_to_bottom(&mut self) {
        self.ops.push(Op::Scroll);
    }

    fn set_status_text(&mut self, status: &str) -> bool {
        match self.status_display.as_mut() {
            Some(text) => {
                *text = status.to_owned();
                true
            }
            None => false,
        }
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.connection.push(status);
    }
}

struct FakeEmitter {
    sent: RefCell<Vec<Frame>>,
    open: bool,
}

impl Default for FakeEmitter {
    fn default() -> Self {
        Self { sent: RefCell::new(Vec::new()), open: true }
    }
}

impl FakeEmitter {
    fn events(&self) -> Vec<(String, serde_json::Value)> {
        self.sent.borrow().iter().map(|f| (f.event.clone(), f.data.clone())).collect()
    }
}

impl Emitter for FakeEmitter {
    fn emit(&self, frame: &Frame) -> bool {
        if self.open {
            self.sent.borrow_mut().push(frame.clone());
        }
        self.open
    }
}

fn page_with(dom: FakeDom) -> ChatPage<FakeDom, FakeEmitter> {
    let request_id = RequestId::from_attr(Some("17".to_owned())).expect("request id");
    ChatPage::new(request_id, ChatConfig::default(), dom, FakeEmitter::default())
}

fn page() -> ChatPage<FakeDom, FakeEmitter> {
    page_with(FakeDom::with_status_display())
}

fn inbound(event: &str, data: serde_json::Value) -> Frame {
    Frame::request("srv-1", event, Some("17"), data)
}

// =============================================================
// Mount
// =============================================================

#[test]
fn new_scrolls_message_list_once() {
    let page = page();
    assert_eq!(page.dom().ops, vec![Op::Scroll]);
    assert!(page.emitter().events().is_empty());
}

// =============================================================
// Connection lifecycle
// =============================================================

#[test]
fn connect_emits_one_join_with_request_id() {
    let mut page = page();
    assert!(page.on_connect());
    assert_eq!(page.emitter().events(), vec![(JOIN.to_owned(), serde_json::json!({"room": "17"}))]);
    assert_eq!(page.state().connection_status, ConnectionStatus::Connected);
    assert_eq!(page.state().joins, 1);
}

#[test]
fn every_reconnect_joins_again() {
    let mut page = page();
    page.on_connecting();
    page.on_connect();
    page.on_disconnect();
    page.on_connecting();
    page.on_connect();

    let joins = page.emitter().events().into_iter().filter(|(name, _)| name == JOIN).count();
    assert_eq!(joins, 2);
    assert_eq!(page.state().joins, 2);
    assert_eq!(
        page.dom().connection,
        vec![
            ConnectionStatus::Connecting,
            ConnectionStatus::Connected,
            ConnectionStatus::Disconnected,
            ConnectionStatus::Connecting,
            ConnectionStatus::Connected,
        ]
    );
}

#[test]
fn join_frame_is_addressed_to_room() {
    let mut page = page();
    page.on_connect();
    let sent = page.emitter().sent.borrow();
    assert_eq!(sent[0].room.as_deref(), Some("17"));
}

// =============================================================
// Send
// =============================================================

#[test]
fn send_hello_emits_message_and_clears_input() {
    let mut page = page();
    page.dom.input = "Hello".to_owned();
    assert!(page.on_send());
    assert_eq!(
        page.emitter().events(),
        vec![(SEND_MESSAGE.to_owned(), serde_json::json!({"msg": "Hello", "request_id": "17"}))]
    );
    assert_eq!(page.dom().input, "");
}

#[test]
fn send_blank_input_emits_nothing_and_keeps_input() {
    let mut page = page();
    page.dom.input = "  ".to_owned();
    assert!(!page.on_send());
    assert!(page.emitter().events().is_empty());
    assert_eq!(page.dom().input, "  ");

    page.dom.input = "\n\t".to_owned();
    assert!(!page.on_send());
    assert!(page.emitter().events().is_empty());
}

#[test]
fn send_blank_test_matches_browser_trim() {
    let mut page = page();
    page.dom.input = "\u{feff} \u{3000}".to_owned();
    assert!(!page.on_send());
    assert!(page.emitter().events().is_empty());

    page.dom.input = "\u{85}".to_owned();
    assert!(page.on_send());
    assert_eq!(
        page.emitter().events(),
        vec![(SEND_MESSAGE.to_owned(), serde_json::json!({"msg": "\u{85}", "request_id": "17"}))]
    );
}

#[test]
fn send_keeps_surrounding_whitespace() {
    let mut page = page();
    page.dom.input = "  need refill  ".to_owned();
    page.on_send();
    let events = page.emitter().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].1["msg"], "  need refill  ");
}

#[test]
fn enter_key_sends_like_button() {
    let mut page = page();
    page.dom.input = "Hello".to_owned();
    assert!(page.on_input_key("Enter"));
    assert_eq!(page.emitter().events().len(), 1);
    assert_eq!(page.dom().input, "");
}

#[test]
fn other_keys_do_not_send() {
    let mut page = page();
    page.dom.input = "Hello".to_owned();
    assert!(!page.on_input_key("a"));
    assert!(!page.on_input_key("Shift"));
    assert!(page.emitter().events().is_empty());
    assert_eq!(page.dom().input, "Hello");
}

#[test]
fn enter_on_blank_input_does_nothing() {
    let mut page = page();
    page.dom.input = "   ".to_owned();
    assert!(!page.on_input_key("Enter"));
    assert!(page.emitter().events().is_empty());
}

#[test]
fn send_clears_input_even_when_connection_is_gone() {
    let request_id = RequestId::from_attr(Some("17".to_owned())).expect("request id");
    let emitter = FakeEmitter { sent: RefCell::new(Vec::new()), open: false };
    let mut page = ChatPage::new(request_id, ChatConfig::default(), FakeDom::default(), emitter);
    page.dom.input = "Hello".to_owned();
    assert!(page.on_send());
    assert_eq!(page.dom().input, "");
}

// =============================================================
// Status relay
// =============================================================

#[test]
fn status_click_emits_change_status_with_control_value() {
    let mut page = page();
    assert!(page.on_status_click(Some("Ready for Pickup")));
    assert!(page.on_status_click(Some("Rejected")));
    assert_eq!(
        page.emitter().events(),
        vec![
            (CHANGE_STATUS.to_owned(), serde_json::json!({"request_id": "17", "status": "Ready for Pickup"})),
            (CHANGE_STATUS.to_owned(), serde_json::json!({"request_id": "17", "status": "Rejected"})),
        ]
    );
}

#[test]
fn status_click_without_value_still_emits_once() {
    let mut page = page();
    assert!(page.on_status_click(None));
    assert_eq!(page.emitter().events(), vec![(CHANGE_STATUS.to_owned(), serde_json::json!({"request_id": "17"}))]);
}

#[test]
fn status_click_does_not_touch_display() {
    let mut page = page();
    page.on_status_click(Some("Ready"));
    assert_eq!(page.dom().status_display.as_deref(), Some("Pending"));
    assert!(page.state().status.is_none());
}

// =============================================================
// Inbound
// =============================================================

#[test]
fn each_received_message_appends_one_block_then_scrolls() {
    let mut page = page();
    page.dispatch(&inbound(RECEIVE_MESSAGE, serde_json::json!({"username": "ann", "msg": "one", "timestamp": "t1"})));
    page.dispatch(&inbound(RECEIVE_MESSAGE, serde_json::json!({"username": "bob", "msg": "two", "timestamp": "t2"})));

    let ops = &page.dom().ops;
    assert_eq!(ops.len(), 5);
    assert_eq!(ops[0], Op::Scroll);
    assert!(matches!(&ops[1], Op::Append(m) if m.contains("one")));
    assert_eq!(ops[2], Op::Scroll);
    assert!(matches!(&ops[3], Op::Append(m) if m.contains("two")));
    assert_eq!(ops[4], Op::Scroll);

    let names: Vec<&str> = page.state().messages.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, vec!["ann", "bob"]);
}

#[test]
fn duplicate_messages_are_not_deduplicated() {
    let mut page = page();
    let frame = inbound(RECEIVE_MESSAGE, serde_json::json!({"username": "ann", "msg": "same", "timestamp": "t"}));
    page.dispatch(&frame);
    page.dispatch(&frame);
    assert_eq!(page.dom().appended().len(), 2);
}

#[test]
fn malformed_message_renders_undefined_fields() {
    let mut page = page();
    page.dispatch(&inbound(RECEIVE_MESSAGE, serde_json::json!({"msg": "hi"})));
    let appended = page.dom().appended();
    assert_eq!(appended.len(), 1);
    assert!(appended[0].contains("<strong>undefined:</strong>"));
}

#[test]
fn escaped_mode_applies_to_rendered_blocks() {
    let request_id = RequestId::from_attr(Some("17".to_owned())).expect("request id");
    let config = ChatConfig { markup: MarkupMode::Escaped, ..ChatConfig::default() };
    let mut page = ChatPage::new(request_id, config, FakeDom::default(), FakeEmitter::default());
    page.on_receive_message(ChatMessage {
        username: "ann".to_owned(),
        msg: "<b>hi</b>".to_owned(),
        timestamp: "t".to_owned(),
    });
    assert!(page.dom().appended()[0].contains("&lt;b&gt;hi&lt;/b&gt;"));
}

#[test]
fn status_update_replaces_display_text_verbatim() {
    let mut page = page();
    page.dispatch(&inbound(STATUS_UPDATED, serde_json::json!({"status": "Awaiting Reply"})));
    assert_eq!(page.dom().status_display.as_deref(), Some("Awaiting Reply"));
    page.dispatch(&inbound(STATUS_UPDATED, serde_json::json!({"status": "  Ready "})));
    assert_eq!(page.dom().status_display.as_deref(), Some("  Ready "));
    assert_eq!(page.state().status.as_deref(), Some("  Ready "));
}

#[test]
fn status_update_for_other_room_still_wins() {
    let mut page = page();
    let frame = Frame::request("srv-2", STATUS_UPDATED, Some("99"), serde_json::json!({"status": "Closed"}));
    page.dispatch(&frame);
    assert_eq!(page.dom().status_display.as_deref(), Some("Closed"));
}

#[test]
fn status_update_without_display_is_a_noop() {
    let mut page = page_with(FakeDom::default());
    assert!(!page.on_status_updated(StatusUpdated { status: "Ready".to_owned() }));
    assert!(page.dom().status_display.is_none());
    assert_eq!(page.dom().ops, vec![Op::Scroll]);
}

#[test]
fn unknown_and_outbound_events_are_ignored() {
    let mut page = page();
    page.dispatch(&inbound("typing", serde_json::json!({})));
    page.dispatch(&inbound(SEND_MESSAGE, serde_json::json!({"msg": "echo", "request_id": "17"})));
    page.dispatch(&inbound(JOIN, serde_json::json!({"broken": true})));
    assert_eq!(page.dom().ops, vec![Op::Scroll]);
    assert!(page.state().messages.is_empty());
    assert!(page.emitter().events().is_empty());
}
