//! WASM browser tests - run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use folio::{
    CounterConfig, CountingNumber, DomEvents, FolioPage, FrameScheduler, IntersectionVisibility,
    ManualFrameScheduler, MenuController, RafScheduler,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Document, Element, HtmlElement, Node};

const MANIFEST: &str = r#"
folio: "0.1"
profile:
  name: Jordan Lee
stats:
  - label: Projects delivered
    target: 10
    suffix: "+"
"#;

fn document() -> Document {
    window().expect("window").document().expect("document")
}

fn element(tag: &str) -> Element {
    let element = document().create_element(tag).expect("create element");
    document()
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

/// Resolves on the next animation frame, after frames requested earlier.
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window()
            .expect("window")
            .request_animation_frame(&resolve)
            .expect("request frame");
    });
    JsFuture::from(promise).await.expect("frame");
}

fn click(target: &Element) {
    target
        .clone()
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

// ============================================================================
// RafScheduler Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_raf_request_and_cancel() {
    let scheduler = RafScheduler::new().expect("scheduler");
    let handle = scheduler.request_frame(Box::new(|_| {}));
    assert_eq!(scheduler.pending(), 1);

    scheduler.cancel_frame(handle);
    assert_eq!(scheduler.pending(), 0);
}

#[wasm_bindgen_test]
async fn test_raf_fires_with_timestamp() {
    let scheduler = RafScheduler::new().expect("scheduler");
    let fired_at = Rc::new(Cell::new(None));
    let fired_clone = fired_at.clone();
    scheduler.request_frame(Box::new(move |now| fired_clone.set(Some(now))));

    next_frame().await;
    assert!(fired_at.get().is_some_and(|now| now > 0.0));
    assert_eq!(scheduler.pending(), 0);
}

#[wasm_bindgen_test]
async fn test_raf_drop_cancels_pending() {
    let fired = Rc::new(Cell::new(false));
    let fired_clone = fired.clone();
    {
        let scheduler = RafScheduler::new().expect("scheduler");
        scheduler.request_frame(Box::new(move |_| fired_clone.set(true)));
    }

    next_frame().await;
    next_frame().await;
    assert!(!fired.get());
}

#[wasm_bindgen_test]
async fn test_raf_cancelled_frame_never_fires() {
    let scheduler = RafScheduler::new().expect("scheduler");
    let fired = Rc::new(Cell::new(false));
    let fired_clone = fired.clone();
    let handle = scheduler.request_frame(Box::new(move |_| fired_clone.set(true)));
    scheduler.cancel_frame(handle);

    next_frame().await;
    assert!(!fired.get());
}

// ============================================================================
// DomEvents Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_outside_click_closes_menu() {
    let nav = element("nav");
    let button = document().create_element("button").expect("button");
    nav.append_child(&button).expect("append");
    let outside = element("div");

    let root: Node = nav.clone().into();
    let mut menu = MenuController::new(move |node: &Node| root.contains(Some(node)));
    menu.mount(&DomEvents::new().expect("events"));

    menu.toggle();
    click(&button);
    assert!(menu.is_open());

    click(&outside);
    assert!(!menu.is_open());
}

#[wasm_bindgen_test]
fn test_unmounted_menu_ignores_clicks() {
    let outside = element("div");
    let mut menu = MenuController::new(|_: &Node| false);
    menu.mount(&DomEvents::new().expect("events"));
    menu.toggle();
    menu.unmount();

    click(&outside);
    assert!(menu.is_open());
}

// ============================================================================
// Counter Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_counter_with_dom_element() {
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let target = element("span");
    let mut counter = CountingNumber::new(
        CounterConfig::new(3).suffix("+"),
        scheduler.clone(),
        Rc::new(IntersectionVisibility),
    );

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    counter.on_value(move |text| seen_clone.borrow_mut().push(text.to_string()));

    counter.bind(target.clone());
    assert!(counter.is_bound());

    // Same element is a no-op.
    counter.bind(target);
    counter.on_visibility_enter();
    scheduler.run_frame(0.0);
    scheduler.run_frame(2000.0);

    assert_eq!(counter.display(), "3+");
    assert_eq!(*seen.borrow(), vec!["3+"]);
}

// ============================================================================
// FolioPage Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_folio_page_exports() {
    let nav = element("nav");
    let stat = element("span");
    let mut page = FolioPage::new(MANIFEST, nav).expect("page");

    let stats = js_sys::Array::of1(&stat);
    assert_eq!(page.mount(&stats).expect("mount"), 1);
    assert_eq!(stat.text_content().as_deref(), Some("0+"));

    page.toggle_menu();
    assert!(page.is_menu_open());
    assert_eq!(page.follow_link("#about", true).as_deref(), Some("about"));
    assert!(!page.is_menu_open());
    assert_eq!(page.follow_link("#skills", false).as_deref(), Some("skills"));
    assert_eq!(page.active_section(), "skills");

    let snapshot = page.snapshot().expect("snapshot");
    assert!(snapshot.contains("\"active_section\":\"skills\""));
    assert!(page.manifest_json().expect("json").contains("Jordan Lee"));
    page.unmount();
}

#[wasm_bindgen_test]
fn test_folio_page_remount_moves_counters() {
    let nav = element("nav");
    let first = element("span");
    let second = element("span");
    let mut page = FolioPage::new(MANIFEST, nav).expect("page");

    page.mount(&js_sys::Array::of1(&first)).expect("mount");
    assert_eq!(first.text_content().as_deref(), Some("0+"));
    page.unmount();
    first.set_text_content(Some("stale"));

    page.mount(&js_sys::Array::of1(&second)).expect("remount");
    assert_eq!(second.text_content().as_deref(), Some("0+"));
    assert_eq!(first.text_content().as_deref(), Some("stale"));
    page.unmount();
}

#[wasm_bindgen_test]
fn test_folio_page_rejects_bad_manifest() {
    let nav = element("nav");
    assert!(FolioPage::new("folio: [", nav).is_err());
}
