use super::*;
use client::config::ChatConfig;
use client::page::{ChatPage, Emitter, RequestId};
use frames::Frame;
use frames::events::ChatMessage;
use std::cell::RefCell;

#[derive(Default)]
struct Recorder(RefCell<Vec<Frame>>);

impl Emitter for Recorder {
    fn emit(&self, frame: &Frame) -> bool {
        self.0.borrow_mut().push(frame.clone());
        true
    }
}

fn page() -> ChatPage<TerminalDom<Vec<u8>>, Recorder> {
    let request_id = RequestId::from_attr(Some("17".to_owned())).expect("request id");
    ChatPage::new(request_id, ChatConfig::default(), TerminalDom::new(Vec::new()), Recorder::default())
}

fn printed(page: &ChatPage<TerminalDom<Vec<u8>>, Recorder>) -> String {
    String::from_utf8(page.dom().output().clone()).expect("utf8")
}

#[test]
fn parse_command_recognizes_quit_and_status() {
    assert_eq!(parse_command("/quit\n"), Command::Quit);
    assert_eq!(parse_command("  /quit  "), Command::Quit);
    assert_eq!(parse_command("/status Ready for Pickup\n"), Command::Status("Ready for Pickup".to_owned()));
}

#[test]
fn parse_command_keeps_message_whitespace() {
    assert_eq!(parse_command("  hello  \r\n"), Command::Send("  hello  ".to_owned()));
    assert_eq!(parse_command("\n"), Command::Send(String::new()));
    assert_eq!(parse_command("/statusx"), Command::Send("/statusx".to_owned()));
}

#[test]
fn received_messages_print_one_line_each() {
    let mut page = page();
    page.on_receive_message(ChatMessage {
        username: "ann".to_owned(),
        msg: "Ready for pickup".to_owned(),
        timestamp: "2024-05-01 10:30".to_owned(),
    });
    page.on_receive_message(ChatMessage::from_payload(&serde_json::json!({"msg": "hi"})));
    assert_eq!(printed(&page), "ann: Ready for pickup (2024-05-01 10:30)\nundefined: hi (undefined)\n");
}

#[test]
fn status_updates_print_status_line() {
    let mut page = page();
    let frame = Frame::request("s-1", "status_updated", Some("17"), serde_json::json!({"status": "Awaiting Reply"}));
    page.dispatch(&frame);
    assert_eq!(printed(&page), "status: Awaiting Reply\n");
}

#[test]
fn typed_line_goes_through_send_path() {
    let mut page = page();
    page.dom_mut().set_input_value("Hello");
    assert!(page.on_send());
    assert_eq!(page.dom().input_value(), "");

    page.dom_mut().set_input_value("   ");
    assert!(!page.on_send());
    assert_eq!(page.dom().input_value(), "   ");

    let sent = page.emitter().0.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].data, serde_json::json!({"msg": "Hello", "request_id": "17"}));
}
