//! Manifest types for the profile page.

use crate::error::ManifestError;
use folio_core::{CounterConfig, Section, DEFAULT_DURATION_MS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Site manifest loaded from `folio.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub folio: String,
    /// Hero section content
    pub profile: Profile,
    /// Navigation label overrides, keyed by section anchor
    #[serde(default)]
    pub navigation: BTreeMap<String, String>,
    /// Stat counters shown in the About section
    #[serde(default)]
    pub stats: Vec<StatConfig>,
    /// Skill carousel entries
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Project cards
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Experience timeline, most recent first
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Contact details
    #[serde(default)]
    pub contact: Contact,
}

/// Hero section content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Role shown under the name
    #[serde(default)]
    pub headline: String,
    /// Introductory paragraph
    #[serde(default)]
    pub summary: String,
    /// Whether the availability badge is shown
    #[serde(default)]
    pub available: bool,
    /// Profile photo path
    #[serde(default)]
    pub photo: Option<String>,
    /// Downloadable resume path
    #[serde(default)]
    pub resume: Option<String>,
}

/// Stat counter entry.
///
/// Numbers are kept signed so out-of-range values surface as validation
/// errors rather than YAML type errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatConfig {
    /// Caption under the number
    pub label: String,
    /// Value counted up to
    pub target: i64,
    /// Text after the number, e.g. `+`
    #[serde(default)]
    pub suffix: String,
    /// Counting duration in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: i64,
}

const fn default_duration_ms() -> i64 {
    DEFAULT_DURATION_MS as i64
}

impl StatConfig {
    /// Counter configuration for this stat.
    pub fn counter_config(&self) -> Result<CounterConfig, ManifestError> {
        let config = CounterConfig::try_from_signed(self.target)?
            .duration_ms(self.duration_ms)
            .suffix(self.suffix.clone());
        Ok(config)
    }
}

/// Skill proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    /// Daily, production use
    Expert,
    /// Working knowledge
    Intermediate,
}

impl SkillLevel {
    /// CSS class of the level badge.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Expert => "skill-level-expert",
            Self::Intermediate => "skill-level-intermediate",
        }
    }
}

/// Skill carousel entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name
    pub name: String,
    /// Proficiency
    pub level: SkillLevel,
}

/// Project card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project title
    pub title: String,
    /// One-line description
    #[serde(default)]
    pub description: String,
    /// Technology tags
    #[serde(default)]
    pub tech: Vec<String>,
    /// Source code link
    #[serde(default)]
    pub code_url: Option<String>,
    /// Live demo link
    #[serde(default)]
    pub demo_url: Option<String>,
}

/// Experience timeline entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    /// Role title
    pub title: String,
    /// Employer
    pub company: String,
    /// Period, free text (e.g. `2023 - 2025`)
    pub period: String,
    /// What the role involved
    #[serde(default)]
    pub description: String,
}

/// Contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// LinkedIn profile URL
    #[serde(default)]
    pub linkedin: Option<String>,
    /// GitHub profile URL
    #[serde(default)]
    pub github: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl Manifest {
    /// Parse a manifest from YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Parse and validate a manifest.
    pub fn load(yaml: &str) -> Result<Self, ManifestError> {
        let manifest = Self::from_yaml(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check the manifest for values the page cannot render.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.profile.name.trim().is_empty() {
            return Err(ManifestError::MissingField("profile.name".to_string()));
        }

        for anchor in self.navigation.keys() {
            if Section::from_anchor(anchor).is_none() {
                return Err(ManifestError::invalid(
                    format!("navigation.{anchor}"),
                    "unknown section",
                ));
            }
        }

        for (i, stat) in self.stats.iter().enumerate() {
            if stat.label.trim().is_empty() {
                return Err(ManifestError::MissingField(format!("stats[{i}].label")));
            }
            if stat.target < 0 {
                return Err(ManifestError::invalid(
                    format!("stats[{i}].target"),
                    "must be non-negative",
                ));
            }
        }

        Ok(())
    }

    /// Counter configuration for every stat, in manifest order.
    pub fn counter_configs(&self) -> Result<Vec<CounterConfig>, ManifestError> {
        self.stats.iter().map(StatConfig::counter_config).collect()
    }

    /// Navigation label of `section`.
    #[must_use]
    pub fn nav_label(&self, section: Section) -> &str {
        self.navigation
            .get(section.anchor())
            .map_or(section.default_label(), String::as_str)
    }

    /// Navigation links in page order.
    #[must_use]
    pub fn nav_links(&self) -> Vec<(Section, &str)> {
        Section::ALL
            .into_iter()
            .map(|section| (section, self.nav_label(section)))
            .collect()
    }
}
