//! TOML overrides layered over the built-in content.
//!
//! ```toml
//! [prompts]
//! rice = "Pick a rice."
//!
//! [themes.italian.hero]
//! title = "Your Roman Bowl"
//! description = "..."
//! image_ref = "hero-section/italian/hero-image.png"
//!
//! [[themes.italian.sections.rice]]
//! image_ref = "italian/rice/risotto.png"
//! display_name = "Risotto"
//!
//! [voices.bronx.fallback]
//! remote_voice_id = ""
//! local_asset = "voice-generation/voices/bronx/scream-protein-skipped.mp3"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use tasteshift_types::{HeroContent, MenuItem, VoiceProfile};

use crate::CatalogError;

/// Parsed overrides file.
///
/// Keys stay as strings until applied so that a typo surfaces as
/// [`CatalogError::InvalidKey`] naming the offending key. Theme keys are
/// theme ids, section keys are section ids, and keys of `prompts` and
/// `voices.<theme>` are prompt keys (`protein` .. `toppings`, `fallback`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentOverrides {
    #[serde(default)]
    pub themes: BTreeMap<String, ThemePatch>,
    #[serde(default)]
    pub prompts: BTreeMap<String, String>,
    #[serde(default)]
    pub voices: BTreeMap<String, BTreeMap<String, VoiceProfile>>,
}

/// Replacement content for one theme.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemePatch {
    pub hero: Option<HeroContent>,
    #[serde(default)]
    pub sections: BTreeMap<String, Vec<MenuItem>>,
}

impl ContentOverrides {
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &str) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
