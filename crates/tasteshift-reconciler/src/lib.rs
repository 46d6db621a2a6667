//! Persistent customization of the host menu page.
//!
//! The [`Reconciler`] owns the element -> [`Override`] table and enforces
//! it against a host that keeps resetting its own markup. Three entry
//! points share that table:
//!
//! - [`Reconciler::reconcile`], the full pass: theme tag, irrelevant
//!   sections, hero, then every section's cards.
//! - [`Reconciler::fast_tick`], the throttled per-frame repair that only
//!   re-applies pictures, names and detail buttons of known overrides.
//! - [`classify`], which maps observed mutations to one of the two.
//!
//! Every write is compared against the current value first, so a pass over
//! an unchanged page performs no writes and raises no mutations of its own.

mod card;
mod classify;
mod error;
mod hero;
pub mod layout;
pub mod markers;
mod overrides;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tasteshift_catalog::{Catalog, ThemeContent};
use tasteshift_page::{NodeId, Page};
use tasteshift_types::{AssetBase, MenuItem, SectionId, ThemeId};

pub use classify::{classify, Trigger};
pub use error::ReconcileError;
pub use layout::HostLayout;
pub use overrides::{Override, OverrideTable};

use markers::{
    css_url, set_attr_if, set_style_if, set_text_if, BACKGROUND_IMAGE, ITEM_ATTR, SECTION_ATTR,
    THEME_ATTR,
};

/// Default minimum spacing between fast-path repairs.
pub const DEFAULT_FAST_SPACING: Duration = Duration::from_millis(100);

/// Outcome of one full pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub hero_applied: bool,
    /// Sections whose cards were located and paired.
    pub sections_applied: Vec<SectionId>,
    /// Sections not rendered yet; retried on the next pass.
    pub sections_deferred: Vec<SectionId>,
    pub cards_written: usize,
    pub cards_removed: usize,
    pub categories_removed: usize,
    pub overrides_dropped: usize,
    pub repairs: usize,
}

/// Reconciles the host page with the active theme's catalog content.
#[derive(Debug)]
pub struct Reconciler {
    layout: HostLayout,
    catalog: Catalog,
    assets: AssetBase,
    theme: ThemeId,
    content: Arc<ThemeContent>,
    overrides: OverrideTable,
    fast_spacing: Duration,
    last_fast: Option<Instant>,
}

impl Reconciler {
    pub fn new(
        layout: HostLayout,
        catalog: Catalog,
        assets: AssetBase,
        theme: ThemeId,
    ) -> Result<Self, ReconcileError> {
        let content = catalog.theme(theme)?;
        Ok(Self {
            layout,
            catalog,
            assets,
            theme,
            content,
            overrides: OverrideTable::default(),
            fast_spacing: DEFAULT_FAST_SPACING,
            last_fast: None,
        })
    }

    pub fn with_fast_spacing(mut self, spacing: Duration) -> Self {
        self.fast_spacing = spacing;
        self
    }

    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn layout(&self) -> &HostLayout {
        &self.layout
    }

    pub fn assets(&self) -> &AssetBase {
        &self.assets
    }

    /// Runs one full reconciliation pass.
    pub fn reconcile(&mut self, page: &mut Page) -> PassReport {
        let mut report = PassReport::default();
        let root = page.root();
        set_attr_if(page, root, THEME_ATTR, self.theme.as_str());

        report.overrides_dropped = self.overrides.retain_attached(page);
        report.categories_removed = self.remove_unwanted_sections(page);
        report.hero_applied = hero::apply_hero(
            page,
            &self.layout,
            &self.assets,
            self.theme,
            &self.content.hero,
        );

        let content = Arc::clone(&self.content);
        for section in SectionId::ORDER {
            match self.apply_section(page, section, content.items(section)) {
                Some((written, removed)) => {
                    report.cards_written += written;
                    report.cards_removed += removed;
                    report.sections_applied.push(section);
                }
                None => report.sections_deferred.push(section),
            }
        }

        report.repairs = self.reapply_known(page);
        if report.cards_written + report.cards_removed + report.categories_removed > 0 {
            tracing::debug!(
                theme = %self.theme,
                written = report.cards_written,
                removed = report.cards_removed,
                categories = report.categories_removed,
                deferred = report.sections_deferred.len(),
                "reconciliation pass changed the page"
            );
        }
        report
    }

    /// Re-applies the picture, name and detail button of every known
    /// override whose element is still attached. Returns the number of
    /// repairs.
    pub fn reapply_known(&self, page: &mut Page) -> usize {
        let mut repairs = 0;
        for (element, entry) in self.overrides.iter() {
            if !page.is_attached(element) {
                continue;
            }
            if set_style_if(page, element, BACKGROUND_IMAGE, &css_url(&entry.image_url)) {
                tracing::debug!(%element, item = %entry.display_name, "re-applied override picture");
                repairs += 1;
            }
            let label = page.find_first(element, |n| n.has_class(&self.layout.item_name_class));
            if let Some(label) = label {
                if set_text_if(page, label, &entry.display_name) {
                    tracing::debug!(%element, item = %entry.display_name, "re-applied override name");
                    repairs += 1;
                }
            }
            if !card::has_info_button(page, element) {
                repairs += card::ensure_info_button(
                    page,
                    &self.assets,
                    element,
                    &entry.display_name,
                    &entry.country_tag,
                );
            }
        }
        repairs
    }

    /// Fast-path tick. Runs [`Reconciler::reapply_known`] unless the last
    /// run was less than the configured spacing ago, in which case `None`
    /// is returned and nothing is touched.
    pub fn fast_tick(&mut self, page: &mut Page, now: Instant) -> Option<usize> {
        if let Some(last) = self.last_fast {
            if now.saturating_duration_since(last) < self.fast_spacing {
                return None;
            }
        }
        self.last_fast = Some(now);
        Some(self.reapply_known(page))
    }

    /// Switches the active theme.
    ///
    /// Clears the override table and every marker tied to the old theme,
    /// then runs a full pass for the new one. Sections the host has not
    /// rendered yet converge on later passes.
    pub fn switch_theme(
        &mut self,
        page: &mut Page,
        theme: ThemeId,
    ) -> Result<PassReport, ReconcileError> {
        let content = self.catalog.theme(theme)?;
        let previous = self.theme;
        self.theme = theme;
        self.content = content;
        self.overrides.clear();
        self.last_fast = None;

        hero::clear_hero_marker(page, &self.layout);
        for element in page.find_all(page.root(), |n| n.has_attr(markers::OVERRIDE_IMAGE_ATTR)) {
            page.remove_attr(element, markers::OVERRIDE_IMAGE_ATTR);
        }

        tracing::info!(from = %previous, to = %theme, "theme switched");
        Ok(self.reconcile(page))
    }

    /// Locates the `.item-selector` of a section.
    pub fn find_section(&self, page: &Page, section: SectionId) -> Option<NodeId> {
        let layout = &self.layout;
        let selectors = page.find_all(page.body(), |n| n.has_class(&layout.selector_class));
        match layout.marker(section) {
            Some(marker) => selectors
                .into_iter()
                .find(|&s| page.attr(s, &layout.section_attr) == Some(marker)),
            None => selectors.into_iter().find(|&s| {
                page.find_first(s, |n| n.has_class(&layout.title_class))
                    .is_some_and(|title| page.text_content(title).trim() == layout.toppings_title)
            }),
        }
    }

    /// Cards of a located section in document order.
    pub fn section_cards(&self, page: &Page, selector: NodeId) -> Vec<NodeId> {
        let layout = &self.layout;
        let Some(cards) = page.find_first(selector, |n| n.has_class(&layout.cards_class)) else {
            return Vec::new();
        };
        page.find_all(cards, |n| n.has_class(&layout.card_class))
    }

    fn remove_unwanted_sections(&self, page: &mut Page) -> usize {
        let layout = &self.layout;
        let mut removed = 0;
        for marker in &layout.unwanted_sections {
            let Some(selector) = page.find_first(page.body(), |n| {
                n.attr(&layout.section_attr) == Some(marker.as_str())
            }) else {
                continue;
            };
            if let Some(category) = page.closest(selector, |n| n.has_class(&layout.category_class)) {
                page.remove(category);
                tracing::debug!(section = %marker, "removed irrelevant section");
                removed += 1;
            }
        }
        removed
    }

    /// Returns `None` when the section is not rendered yet, otherwise the
    /// number of cards written and removed.
    fn apply_section(
        &mut self,
        page: &mut Page,
        section: SectionId,
        items: &[MenuItem],
    ) -> Option<(usize, usize)> {
        let selector = self.find_section(page, section)?;
        let cards = self.section_cards(page, selector);
        if cards.is_empty() {
            return None;
        }

        let theme = self.theme.as_str();
        set_attr_if(page, selector, SECTION_ATTR, section.as_str());
        set_attr_if(page, selector, THEME_ATTR, theme);

        let paired = cards.len().min(items.len());
        let mut written = 0;
        for (&card, item) in cards.iter().zip(items) {
            if self.is_customized(page, card, item) {
                set_attr_if(page, card, ITEM_ATTR, &item.display_name);
                if !card::has_info_button(page, card) {
                    card::ensure_info_button(
                        page,
                        &self.assets,
                        card,
                        &item.display_name,
                        item.country_tag(),
                    );
                }
            } else {
                card::write_card(page, &self.layout, &self.assets, card, item);
                self.overrides.insert(
                    card,
                    Override {
                        theme: self.theme,
                        section,
                        image_ref: item.image_ref.clone(),
                        image_url: self.assets.picture(&item.image_ref),
                        display_name: item.display_name.clone(),
                        country_tag: item.country_tag().to_string(),
                    },
                );
                tracing::debug!(%card, %section, item = %item.display_name, "card customized");
                written += 1;
            }
            set_attr_if(page, card, THEME_ATTR, theme);
        }

        let mut removed = 0;
        for &extra in &cards[paired..] {
            tracing::debug!(
                %section,
                host_item = page.attr(extra, "data-qa-item-name").unwrap_or("unknown"),
                "removing surplus card"
            );
            page.remove(extra);
            removed += 1;
        }
        Some((written, removed))
    }

    /// A card counts as customized when it shows the intended name and we
    /// hold an override for it under the active theme with the same picture.
    fn is_customized(&self, page: &Page, card: NodeId, item: &MenuItem) -> bool {
        let name_matches =
            card::card_name(page, &self.layout, card).as_deref() == Some(item.display_name.as_str());
        name_matches
            && self.overrides.get(card).is_some_and(|entry| {
                entry.theme == self.theme && entry.image_ref == item.image_ref
            })
    }
}
