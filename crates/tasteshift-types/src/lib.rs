//! Shared types and constants for the tasteshift workspace.
//!
//! This crate provides the identifiers that every other crate agrees on:
//! the active cuisine theme, the four ordered menu sections, the prompt
//! keys used by the voice guide, and the immutable catalog records that
//! the reconciler writes onto the host page.
//!
//! No crate in the workspace depends on anything *except* `tasteshift-types`
//! for cross-cutting type definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod assets;
mod menu;
pub mod voice;

pub use assets::AssetBase;
pub use menu::{HeroContent, HeroTitle, MenuItem};
pub use voice::VoiceProfile;

/// A cuisine theme applied to the host page.
///
/// Exactly one theme is active per page session. Switching it invalidates
/// every piece of derived state (overrides, selections, prompt guards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Italian,
    Chinese,
    Bronx,
    Brooklyn,
    English,
    Jamaican,
}

impl ThemeId {
    /// Every theme, in selector display order.
    pub const ALL: [ThemeId; 6] = [
        Self::Italian,
        Self::Chinese,
        Self::Bronx,
        Self::Brooklyn,
        Self::English,
        Self::Jamaican,
    ];

    /// Returns the canonical lowercase identifier (also the attribute value).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Italian => "italian",
            Self::Chinese => "chinese",
            Self::Bronx => "bronx",
            Self::Brooklyn => "brooklyn",
            Self::English => "english",
            Self::Jamaican => "jamaican",
        }
    }

    /// Returns the human-readable label shown in the theme selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Italian => "Italian",
            Self::Chinese => "Chinese",
            Self::Bronx => "Bronx",
            Self::Brooklyn => "Brooklyn",
            Self::English => "English",
            Self::Jamaican => "Jamaican",
        }
    }

    /// Whether this theme ships an avatar clip.
    pub fn has_avatar(self) -> bool {
        matches!(self, Self::Bronx | Self::Chinese | Self::Italian)
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ParseIdError::Theme(s.to_string()))
    }
}

/// One of the four ordered menu sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Protein,
    Rice,
    Beans,
    Toppings,
}

impl SectionId {
    /// Fixed ordering of the ordering flow.
    pub const ORDER: [SectionId; 4] = [Self::Protein, Self::Rice, Self::Beans, Self::Toppings];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Rice => "rice",
            Self::Beans => "beans",
            Self::Toppings => "toppings",
        }
    }

    /// Position of this section in [`SectionId::ORDER`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The section that follows this one, or `None` for toppings.
    pub fn next(self) -> Option<SectionId> {
        Self::ORDER.get(self.index() + 1).copied()
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| ParseIdError::Section(s.to_string()))
    }
}

/// Key of a spoken prompt: one per section plus the skipped-protein fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKey {
    Section(SectionId),
    Fallback,
}

impl PromptKey {
    /// Every prompt key, sections first.
    pub const ALL: [PromptKey; 5] = [
        Self::Section(SectionId::Protein),
        Self::Section(SectionId::Rice),
        Self::Section(SectionId::Beans),
        Self::Section(SectionId::Toppings),
        Self::Fallback,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section(section) => section.as_str(),
            Self::Fallback => "fallback",
        }
    }

    /// Dense index used by fixed-size guard tables.
    pub fn index(self) -> usize {
        match self {
            Self::Section(section) => section.index(),
            Self::Fallback => SectionId::ORDER.len(),
        }
    }
}

impl From<SectionId> for PromptKey {
    fn from(section: SectionId) -> Self {
        Self::Section(section)
    }
}

impl std::fmt::Display for PromptKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PromptKey {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "fallback" {
            return Ok(Self::Fallback);
        }
        s.parse::<SectionId>()
            .map(Self::Section)
            .map_err(|_| ParseIdError::Prompt(s.to_string()))
    }
}

/// Error returned when parsing an unknown identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdError {
    #[error("unknown theme: {0}")]
    Theme(String),
    #[error("unknown section: {0}")]
    Section(String),
    #[error("unknown prompt key: {0}")]
    Prompt(String),
}
