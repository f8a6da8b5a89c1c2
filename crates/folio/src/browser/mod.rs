//! Browser runtime for Folio.
//!
//! Implements the frame, viewport and page-event seams of `folio-core` on
//! top of `requestAnimationFrame`, `IntersectionObserver` and DOM event
//! listeners, and exports the page to JavaScript.

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod visibility;

#[cfg(target_arch = "wasm32")]
pub use app::{CountingNumberHandle, FolioPage};
#[cfg(target_arch = "wasm32")]
pub use events::DomEvents;
#[cfg(target_arch = "wasm32")]
pub use frame::RafScheduler;
#[cfg(target_arch = "wasm32")]
pub use visibility::IntersectionVisibility;
