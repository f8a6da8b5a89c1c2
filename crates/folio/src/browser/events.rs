//! Page-wide click and scroll listeners.

use folio_core::{ClickHandler, GlobalEvents, ScrollHandler, Subscription};
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Event, EventTarget, MouseEvent, Node, Window};

/// Document click and window scroll events.
#[derive(Debug, Clone)]
pub struct DomEvents {
    window: Window,
    document: Document,
}

impl DomEvents {
    /// Listen on the current window and its document.
    pub fn new() -> Result<Self, JsValue> {
        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        Ok(Self { window, document })
    }
}

impl GlobalEvents for DomEvents {
    type Target = Node;

    fn on_click(&self, mut handler: ClickHandler<Node>) -> Subscription {
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) {
                handler(&node);
            }
        });
        listen(self.document.clone().into(), "click", closure)
    }

    fn on_scroll(&self, mut handler: ScrollHandler) -> Subscription {
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| handler());
        listen(self.window.clone().into(), "scroll", closure)
    }
}

fn listen<F>(target: EventTarget, kind: &'static str, closure: Closure<F>) -> Subscription
where
    F: ?Sized + WasmClosure + 'static,
{
    if let Err(err) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        tracing::warn!(?err, kind, "addEventListener failed");
        return Subscription::detached();
    }

    Subscription::new(move || {
        if let Err(err) = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            tracing::warn!(?err, kind, "removeEventListener failed");
        }
    })
}
