//! Static cuisine content for the tasteshift workspace.
//!
//! The catalog is pure data: per theme a hero banner and, per menu section,
//! an ordered list of [`MenuItem`]s. Alongside it live the spoken prompt
//! texts and the voice table that maps `(theme, prompt)` to a
//! [`VoiceProfile`].
//!
//! Everything ships built in. A TOML overrides file can replace individual
//! heroes, section lists, prompt texts or voice entries without touching
//! the rest (see [`ContentBundle::apply_overrides`]).

mod builtin;
mod error;
mod overrides;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tasteshift_types::{HeroContent, MenuItem, PromptKey, SectionId, ThemeId, VoiceProfile};

pub use error::CatalogError;
pub use overrides::{ContentOverrides, ThemePatch};

/// Content for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeContent {
    pub theme: ThemeId,
    pub hero: HeroContent,
    pub sections: BTreeMap<SectionId, Vec<MenuItem>>,
}

impl ThemeContent {
    /// Items configured for a section, in display order. Empty if none.
    pub fn items(&self, section: SectionId) -> &[MenuItem] {
        self.sections
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Theme id -> content. Shared read-only across the session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    themes: BTreeMap<ThemeId, Arc<ThemeContent>>,
}

impl Catalog {
    /// The six cuisines shipped with the bundle.
    pub fn builtin() -> Self {
        let themes = builtin::THEMES
            .iter()
            .map(|data| {
                let sections = SectionId::ORDER
                    .into_iter()
                    .map(|section| {
                        let items = data
                            .items(section)
                            .iter()
                            .map(|(image, name)| MenuItem::new(*image, *name))
                            .collect();
                        (section, items)
                    })
                    .collect();
                let content = ThemeContent {
                    theme: data.theme,
                    hero: HeroContent {
                        title: data.hero_title.to_string(),
                        description: data.hero_description.to_string(),
                        image_ref: format!("hero-section/{}/hero-image.png", data.theme),
                    },
                    sections,
                };
                (data.theme, Arc::new(content))
            })
            .collect();
        Self { themes }
    }

    /// Looks up the content for a theme.
    pub fn theme(&self, theme: ThemeId) -> Result<Arc<ThemeContent>, CatalogError> {
        self.themes
            .get(&theme)
            .cloned()
            .ok_or(CatalogError::UnknownTheme(theme))
    }

    pub fn themes(&self) -> impl Iterator<Item = ThemeId> + '_ {
        self.themes.keys().copied()
    }

    pub(crate) fn insert(&mut self, content: ThemeContent) {
        self.themes.insert(content.theme, Arc::new(content));
    }
}

/// Prompt key -> spoken text.
#[derive(Debug, Clone, Default)]
pub struct PromptBook {
    texts: HashMap<PromptKey, String>,
}

impl PromptBook {
    pub fn builtin() -> Self {
        let texts = builtin::PROMPTS
            .iter()
            .filter_map(|(key, text)| Some((key.parse().ok()?, text.to_string())))
            .collect();
        Self { texts }
    }

    /// Text for a prompt. A section without configured text gets a generated
    /// `Choose your <section>.` phrase.
    pub fn text(&self, key: PromptKey) -> String {
        match self.texts.get(&key) {
            Some(text) => text.clone(),
            None => format!("Choose your {}.", key.as_str()),
        }
    }

    pub fn set(&mut self, key: PromptKey, text: impl Into<String>) {
        self.texts.insert(key, text.into());
    }

    pub fn remove(&mut self, key: PromptKey) {
        self.texts.remove(&key);
    }
}

/// `(theme, prompt)` -> voice profile.
#[derive(Debug, Clone, Default)]
pub struct VoiceTable {
    entries: HashMap<(ThemeId, PromptKey), VoiceProfile>,
}

impl VoiceTable {
    /// Every theme gets a remote voice id and a local clip for all five keys.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for theme in ThemeId::ALL {
            for key in PromptKey::ALL {
                let clip = match key {
                    PromptKey::Section(section) => format!("choose-{}.mp3", section),
                    PromptKey::Fallback => "scream-protein-skipped.mp3".to_string(),
                };
                table.insert(
                    theme,
                    key,
                    VoiceProfile::new(
                        format!("{}_{}_voice_id", theme, key),
                        format!("voice-generation/voices/{}/{}", theme, clip),
                    ),
                );
            }
        }
        table
    }

    /// Returns `None` when the theme has no entry for this prompt.
    pub fn profile(&self, theme: ThemeId, key: PromptKey) -> Option<&VoiceProfile> {
        self.entries.get(&(theme, key))
    }

    pub fn insert(&mut self, theme: ThemeId, key: PromptKey, profile: VoiceProfile) {
        self.entries.insert((theme, key), profile);
    }

    pub fn remove(&mut self, theme: ThemeId, key: PromptKey) -> Option<VoiceProfile> {
        self.entries.remove(&(theme, key))
    }
}

/// Catalog, prompts and voices loaded together at startup.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub catalog: Catalog,
    pub prompts: PromptBook,
    pub voices: VoiceTable,
}

impl ContentBundle {
    pub fn builtin() -> Self {
        Self {
            catalog: Catalog::builtin(),
            prompts: PromptBook::builtin(),
            voices: VoiceTable::builtin(),
        }
    }

    /// Builds the built-in bundle and layers the overrides file on top, if any.
    pub fn load(overrides_path: Option<&str>) -> Result<Self, CatalogError> {
        let mut bundle = Self::builtin();
        if let Some(path) = overrides_path {
            let overrides = ContentOverrides::from_file(path)?;
            bundle.apply_overrides(overrides)?;
        }
        Ok(bundle)
    }

    /// Replaces heroes, section lists, prompt texts and voice entries named
    /// in `overrides`. Anything not named keeps its built-in value.
    pub fn apply_overrides(&mut self, overrides: ContentOverrides) -> Result<(), CatalogError> {
        for (theme, patch) in overrides.themes {
            let theme: ThemeId = theme.parse()?;
            let mut content = self.catalog.theme(theme)?.as_ref().clone();
            if let Some(hero) = patch.hero {
                content.hero = hero;
            }
            for (section, items) in patch.sections {
                let section: SectionId = section.parse()?;
                tracing::debug!(%theme, %section, count = items.len(), "overriding section items");
                content.sections.insert(section, items);
            }
            self.catalog.insert(content);
        }

        for (key, text) in overrides.prompts {
            let key: PromptKey = key.parse()?;
            self.prompts.set(key, text);
        }

        for (theme, voices) in overrides.voices {
            let theme: ThemeId = theme.parse()?;
            for (key, profile) in voices {
                let key: PromptKey = key.parse()?;
                self.voices.insert(theme, key, profile);
            }
        }

        Ok(())
    }
}
