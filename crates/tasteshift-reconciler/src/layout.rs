//! Structural markers of the host page.

use serde::Deserialize;
use tasteshift_types::SectionId;

/// Class names and attribute values that locate host elements.
///
/// Defaults match the host meal builder. Every field can be overridden from
/// the `[layout]` config section when the host renames something.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostLayout {
    pub header_class: String,
    pub banner_class: String,
    pub heading_class: String,
    pub name_class: String,
    pub description_class: String,

    /// Attribute the host puts on section selectors.
    pub section_attr: String,
    pub protein_marker: String,
    pub rice_marker: String,
    pub beans_marker: String,
    /// The toppings selector has no marker; it is found by its title text.
    pub toppings_title: String,

    pub category_class: String,
    pub selector_class: String,
    pub title_class: String,
    pub cards_class: String,
    pub card_class: String,
    pub inner_card_class: String,
    pub item_name_class: String,
    pub name_title_attr: String,

    /// Section markers whose enclosing category block gets deleted.
    pub unwanted_sections: Vec<String>,
}

impl Default for HostLayout {
    fn default() -> Self {
        Self {
            header_class: "meal-builder-header".into(),
            banner_class: "banner-image".into(),
            heading_class: "heading".into(),
            name_class: "name".into(),
            description_class: "description".into(),
            section_attr: "data-analytics-section".into(),
            protein_marker: "protein-or-veggie".into(),
            rice_marker: "rice".into(),
            beans_marker: "beans".into(),
            toppings_title: "Top Things Off".into(),
            category_class: "item-category".into(),
            selector_class: "item-selector".into(),
            title_class: "title".into(),
            cards_class: "cards".into(),
            card_class: "meal-builder-item-selector-card-container".into(),
            inner_card_class: "card".into(),
            item_name_class: "item-name".into(),
            name_title_attr: "data-qa-item-name-title".into(),
            unwanted_sections: vec![
                "chips-and-dips".into(),
                "single-side".into(),
                "drinks".into(),
            ],
        }
    }
}

impl HostLayout {
    /// The `data-analytics-section` value of a section, or `None` for
    /// sections located by title.
    pub fn marker(&self, section: SectionId) -> Option<&str> {
        match section {
            SectionId::Protein => Some(&self.protein_marker),
            SectionId::Rice => Some(&self.rice_marker),
            SectionId::Beans => Some(&self.beans_marker),
            SectionId::Toppings => None,
        }
    }
}
