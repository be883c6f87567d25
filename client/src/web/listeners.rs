//! DOM event listeners. Each one forwards to a single `ChatPage` method.
//!
//! Closures are leaked with `forget`: the listeners live as long as the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

use super::SharedPage;
use crate::error::MountError;
use crate::page::dom::{STATUS_ATTR, STATUS_CHANGE_SELECTOR};

fn listen(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<(), MountError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| MountError::Listener { event, message: format!("{e:?}") })?;
    closure.forget();
    Ok(())
}

/// Run `f` once on `DOMContentLoaded`.
pub(super) fn once_ready(document: &Document, f: impl FnOnce() + 'static) -> Result<(), MountError> {
    let f = Rc::new(RefCell::new(Some(f)));
    listen(document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.borrow_mut().take() {
            f();
        }
    })
}

pub(super) fn bind_send_button(button: &Element, page: &SharedPage) -> Result<(), MountError> {
    let page = Rc::clone(page);
    listen(button, "click", move |_| {
        page.borrow_mut().on_send();
    })
}

pub(super) fn bind_enter_key(input: &Element, page: &SharedPage) -> Result<(), MountError> {
    let page = Rc::clone(page);
    listen(input, "keypress", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            page.borrow_mut().on_input_key(&key);
        }
    })
}

/// Wire every status control present right now. Returns how many were wired.
pub(super) fn bind_status_controls(document: &Document, page: &SharedPage) -> Result<u32, MountError> {
    let controls = document
        .query_selector_all(STATUS_CHANGE_SELECTOR)
        .map_err(|e| MountError::Listener { event: "click", message: format!("{e:?}") })?;

    let mut wired = 0;
    for index in 0..controls.length() {
        let Some(node) = controls.item(index) else {
            continue;
        };
        let Ok(control) = node.dyn_into::<Element>() else {
            continue;
        };
        let page = Rc::clone(page);
        let target = control.clone();
        listen(&control, "click", move |_| {
            let status = target.get_attribute(STATUS_ATTR);
            if status.is_none() {
                log::debug!("chat: status control without `{STATUS_ATTR}` clicked");
            }
            page.borrow_mut().on_status_click(status.as_deref());
        })?;
        wired += 1;
    }
    Ok(wired)
}
