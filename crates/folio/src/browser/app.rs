//! WASM application entry point.

use super::events::DomEvents;
use super::frame::RafScheduler;
use super::visibility::IntersectionVisibility;
use crate::page::{LinkOrigin, ProfilePage};
use folio_core::{CounterConfig, CountingNumber, FrameScheduler, DEFAULT_DURATION_MS};
use folio_manifest::Manifest;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

/// Install the panic hook and the console tracing subscriber.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "folio started");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Standalone stat counter writing its value into an element.
#[wasm_bindgen]
pub struct CountingNumberHandle {
    inner: CountingNumber<IntersectionVisibility>,
}

#[wasm_bindgen]
impl CountingNumberHandle {
    /// Count up to `target` inside `element` once it scrolls into view.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: Element,
        target: f64,
        duration_ms: Option<f64>,
        suffix: Option<String>,
    ) -> Result<CountingNumberHandle, JsValue> {
        let config = CounterConfig::try_from_number(target)
            .map_err(to_js)?
            .duration_ms(duration_ms.map_or(DEFAULT_DURATION_MS as i64, |ms| ms as i64))
            .suffix(suffix.unwrap_or_default());

        let scheduler: Rc<dyn FrameScheduler> = Rc::new(RafScheduler::new()?);
        let mut inner = CountingNumber::new(config, scheduler, Rc::new(IntersectionVisibility));
        element.set_text_content(Some(&inner.display()));
        let target = element.clone();
        inner.on_value(move |text| target.set_text_content(Some(text)));
        inner.bind(element);
        Ok(Self { inner })
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.inner.value() as f64
    }

    /// Value with suffix, e.g. `7+`.
    pub fn display(&self) -> String {
        self.inner.display()
    }

    /// Whether the count has reached its target.
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Stop counting and release the viewport observer.
    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}

/// The profile page: stat counters, mobile menu and active section.
#[wasm_bindgen]
pub struct FolioPage {
    page: ProfilePage<IntersectionVisibility, Node>,
}

#[wasm_bindgen]
impl FolioPage {
    /// Load `manifest_yaml`. Clicks inside `nav_root` never close the menu.
    #[wasm_bindgen(constructor)]
    pub fn new(manifest_yaml: &str, nav_root: Element) -> Result<FolioPage, JsValue> {
        let manifest = Manifest::load(manifest_yaml).map_err(to_js)?;
        let scheduler: Rc<dyn FrameScheduler> = Rc::new(RafScheduler::new()?);
        let nav_root: Node = nav_root.into();

        let page = ProfilePage::new(
            manifest,
            scheduler,
            Rc::new(IntersectionVisibility),
            move |node: &Node| nav_root.contains(Some(node)),
        )
        .map_err(to_js)?;
        page.on_render(|element: &Element, text: &str| element.set_text_content(Some(text)));

        Ok(Self { page })
    }

    /// Attach stat counters to `stat_elements` (any iterable of elements,
    /// in manifest order) and start listening for page events. Mounting
    /// again moves the counters to the new elements.
    pub fn mount(&mut self, stat_elements: &JsValue) -> Result<usize, JsValue> {
        let elements = js_sys::Array::from(stat_elements)
            .iter()
            .map(|value| value.dyn_into::<Element>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| "stat_elements must contain elements")?;

        let events = DomEvents::new()?;
        Ok(self.page.mount(elements, &events))
    }

    /// Release every counter and listener.
    pub fn unmount(&mut self) {
        self.page.unmount();
    }

    /// Toggle the mobile menu.
    pub fn toggle_menu(&self) {
        self.page.menu().toggle();
    }

    /// Close the mobile menu.
    pub fn close_menu(&self) {
        self.page.menu().close();
    }

    /// Whether the mobile menu is open.
    pub fn is_menu_open(&self) -> bool {
        self.page.menu().is_open()
    }

    /// Call `callback(open)` whenever the menu opens or closes.
    pub fn on_menu_change(&self, callback: js_sys::Function) {
        self.page.menu().on_change(move |state| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(state.is_open())) {
                tracing::warn!(?err, "menu change callback threw");
            }
        });
    }

    /// Handle a navigation link click; returns the section anchor.
    pub fn follow_link(&mut self, href: &str, mobile: bool) -> Option<String> {
        let origin = if mobile {
            LinkOrigin::Mobile
        } else {
            LinkOrigin::Desktop
        };
        self.page
            .follow_link(href, origin)
            .map(|section| section.anchor().to_string())
    }

    /// Anchor of the highlighted navigation link.
    pub fn active_section(&self) -> String {
        self.page.nav().active().anchor().to_string()
    }

    /// Page state as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.page.snapshot_json().map_err(to_js)
    }

    /// Loaded manifest as JSON, for rendering the static sections.
    pub fn manifest_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.page.manifest()).map_err(to_js)
    }
}
