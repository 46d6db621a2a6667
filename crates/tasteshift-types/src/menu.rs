//! Catalog records written onto the host page.

use serde::{Deserialize, Serialize};

/// One menu entry: the picture to show and the name to print under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItem {
    /// Asset path relative to the picture bundle, e.g. `italian/rice/risotto.png`.
    pub image_ref: String,
    pub display_name: String,
}

impl MenuItem {
    pub fn new(image_ref: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            image_ref: image_ref.into(),
            display_name: display_name.into(),
        }
    }

    /// The cuisine tag encoded as the first path segment of the image ref.
    ///
    /// Falls back to `italian` when the ref has no directory component.
    pub fn country_tag(&self) -> &str {
        match self.image_ref.split_once('/') {
            Some((head, _)) if !head.is_empty() => head,
            _ => "italian",
        }
    }
}

/// The hero banner at the top of the menu page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    pub title: String,
    pub description: String,
    pub image_ref: String,
}

/// A hero title split into the small heading and the large name line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroTitle {
    pub heading: String,
    pub name: String,
}

impl HeroContent {
    /// Splits the title into the two lines the host banner renders.
    ///
    /// `Your Italian Piatto` becomes `BUILD YOUR` / `Italian Piatto`,
    /// `Craft Your Wok` becomes `CRAFT YOUR` / `Wok`, and titles without a
    /// recognised prefix keep the full title under `BUILD YOUR`.
    pub fn title_parts(&self) -> HeroTitle {
        let lower = self.title.to_lowercase();
        let words: Vec<&str> = self.title.split_whitespace().collect();

        let (heading, skip) = if lower.starts_with("craft your") {
            ("CRAFT YOUR", 2)
        } else if lower.starts_with("your") {
            ("BUILD YOUR", 1)
        } else if lower.starts_with("craft") {
            ("CRAFT YOUR", 1)
        } else {
            ("BUILD YOUR", 0)
        };

        HeroTitle {
            heading: heading.to_string(),
            name: words.get(skip..).unwrap_or_default().join(" "),
        }
    }
}
