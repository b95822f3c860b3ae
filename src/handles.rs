// Cancellable-subscription bookkeeping. Every listener, observer, and
// animation-frame loop a widget registers goes into one HandleList, and the
// whole list is released as a unit on destroy. Dropping the list releases
// anything still registered, so no exit path can leak a subscription.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::EventTarget;

pub struct HandleList {
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl HandleList {
    pub fn new() -> HandleList {
        HandleList {
            cleanups: Vec::new(),
        }
    }

    pub fn push<F: FnOnce() + 'static>(&mut self, cleanup: F) {
        self.cleanups.push(Box::new(cleanup));
    }

    pub fn len(&self) -> usize {
        self.cleanups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleanups.is_empty()
    }

    pub fn release(&mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }
}

impl Drop for HandleList {
    fn drop(&mut self) {
        self.release();
    }
}

// Registers an argument-less event listener and parks its removal in the
// handle list. The closure lives inside the cleanup, so it stays valid for
// exactly as long as the listener is registered.
pub fn listen<F>(
    handles: &mut HandleList,
    target: &EventTarget,
    kind: &'static str,
    callback: F,
) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    let target = target.clone();
    handles.push(move || {
        let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    });
    Ok(())
}

pub fn listen_mouse<F>(
    handles: &mut HandleList,
    target: &EventTarget,
    kind: &'static str,
    callback: F,
) -> Result<(), JsValue>
where
    F: FnMut(web_sys::MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::MouseEvent)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    let target = target.clone();
    handles.push(move || {
        let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    });
    Ok(())
}
