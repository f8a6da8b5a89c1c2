//! Page sections and the active-section tracker for the navigation bar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level section of the profile page, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Hero banner
    #[default]
    Home,
    /// Biography and stat counters
    About,
    /// Skill carousel
    Skills,
    /// Project cards
    Projects,
    /// Experience timeline
    Experience,
    /// Contact details
    Contact,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Experience,
        Self::Contact,
    ];

    /// Element id of the section, used as the link anchor.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Contact => "contact",
        }
    }

    /// Link target, e.g. `#about`.
    #[must_use]
    pub fn href(self) -> String {
        format!("#{}", self.anchor())
    }

    /// Navigation label used when the manifest does not override it.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Experience => "Experience",
            Self::Contact => "Contact",
        }
    }

    /// Parse an anchor id or href (`about` or `#about`).
    #[must_use]
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);
        Self::ALL.into_iter().find(|s| s.anchor() == id)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// Tracks which section the visitor last navigated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionNav {
    active: Section,
}

impl SectionNav {
    /// Start on [`Section::Home`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active section.
    #[must_use]
    pub const fn active(&self) -> Section {
        self.active
    }

    /// Mark `section` active. Returns whether it changed.
    pub fn select(&mut self, section: Section) -> bool {
        if self.active == section {
            return false;
        }
        tracing::debug!(from = %self.active, to = %section, "active section changed");
        self.active = section;
        true
    }

    /// Mark the section named by a link href active.
    ///
    /// Returns `None` for anchors that name no section.
    pub fn select_anchor(&mut self, href: &str) -> Option<Section> {
        let section = Section::from_anchor(href)?;
        self.select(section);
        Some(section)
    }

    /// Whether `section` is active.
    #[must_use]
    pub fn is_active(&self, section: Section) -> bool {
        self.active == section
    }
}
