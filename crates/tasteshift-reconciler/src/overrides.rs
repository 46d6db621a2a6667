//! The element -> override table.

use std::collections::HashMap;

use tasteshift_page::{NodeId, Page};
use tasteshift_types::{SectionId, ThemeId};

/// What the reconciler wrote onto one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub theme: ThemeId,
    pub section: SectionId,
    pub image_ref: String,
    /// Resolved picture URL, as written into the card background.
    pub image_url: String,
    pub display_name: String,
    pub country_tag: String,
}

/// Overrides keyed by synthetic element id.
///
/// Holding a [`NodeId`] does not keep the element alive; entries for
/// elements that left the page are dropped by [`OverrideTable::retain_attached`].
#[derive(Debug, Default)]
pub struct OverrideTable {
    entries: HashMap<NodeId, Override>,
}

impl OverrideTable {
    pub fn get(&self, element: NodeId) -> Option<&Override> {
        self.entries.get(&element)
    }

    pub fn insert(&mut self, element: NodeId, entry: Override) {
        self.entries.insert(element, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Override)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops entries whose element is no longer attached. Returns how many
    /// were dropped.
    pub fn retain_attached(&mut self, page: &Page) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| page.is_attached(*id));
        before - self.entries.len()
    }
}
