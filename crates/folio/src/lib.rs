//! Folio: WASM runtime for a single-page profile site.
//!
//! Stat counters count up once scrolled into view, and the mobile
//! navigation panel closes on outside clicks and scrolling.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { FolioPage } from './folio.js';
//!
//! async function main() {
//!     await init();
//!     const page = new FolioPage(manifestYaml, document.querySelector('.navbar'));
//!     page.mount(document.querySelectorAll('.stat-number'));
//!     page.on_menu_change((open) => panel.classList.toggle('open', open));
//! }
//! ```

#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    unreachable_pub
)]

pub use folio_core::*;
pub use folio_manifest as manifest;

pub mod browser;
pub mod page;

pub use page::{LinkOrigin, PageSnapshot, ProfilePage, StatCounter, StatSnapshot};

#[cfg(target_arch = "wasm32")]
pub use browser::{CountingNumberHandle, DomEvents, FolioPage, IntersectionVisibility, RafScheduler};
