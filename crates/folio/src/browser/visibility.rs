//! Viewport entry detection via `IntersectionObserver`.

use folio_core::{EnterCallback, Subscription, VisibilityDetector};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};

/// Reports the first time an element intersects the viewport.
///
/// Every observation gets its own observer, disconnected as soon as the
/// element enters or the subscription is released.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionVisibility;

impl VisibilityDetector for IntersectionVisibility {
    type Element = Element;

    fn observe_once(&self, element: &Element, on_enter: EnterCallback) -> Subscription {
        let mut on_enter = Some(on_enter);
        let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let entered = entries
                    .iter()
                    .any(|entry| entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting());
                if !entered {
                    return;
                }
                observer.disconnect();
                if let Some(on_enter) = on_enter.take() {
                    on_enter();
                }
            },
        );

        let observer = match IntersectionObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                tracing::warn!(?err, "IntersectionObserver unavailable, counter stays idle");
                return Subscription::detached();
            }
        };
        observer.observe(element);

        Subscription::new(move || {
            observer.disconnect();
            drop(closure);
        })
    }
}
