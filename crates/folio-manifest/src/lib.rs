//! YAML profile manifest for the Folio profile site.
//!
//! The manifest carries the page content (profile, skills, projects,
//! experience, contact) and the configuration of the stat counters shown in
//! the About section.

mod error;
mod manifest;

pub use error::ManifestError;
pub use manifest::{Contact, Experience, Manifest, Profile, Project, Skill, SkillLevel, StatConfig};
