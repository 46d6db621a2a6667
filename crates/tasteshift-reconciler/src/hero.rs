//! The hero banner at the top of the menu page.

use tasteshift_page::{NodeId, Page};
use tasteshift_types::{AssetBase, HeroContent, ThemeId};

use crate::layout::HostLayout;
use crate::markers::{set_attr_if, set_text_if, HERO_IMAGE_ATTR, HERO_MARKER};

pub(crate) fn find_header(page: &Page, layout: &HostLayout) -> Option<NodeId> {
    page.find_first(page.body(), |n| n.has_class(&layout.header_class))
}

/// Writes the hero for `theme` unless the block is already marked for it.
///
/// The marker goes on first so that the header subtree is recognisable as
/// ours while the remaining writes land. Returns `true` if the hero was
/// written on this call.
pub(crate) fn apply_hero(
    page: &mut Page,
    layout: &HostLayout,
    assets: &AssetBase,
    theme: ThemeId,
    hero: &HeroContent,
) -> bool {
    let Some(header) = find_header(page, layout) else {
        return false;
    };
    if page.attr(header, HERO_MARKER) == Some(theme.as_str()) {
        return false;
    }
    page.set_attr(header, HERO_MARKER, theme.as_str());

    if let Some(banner) = page.find_first(header, |n| n.has_class(&layout.banner_class)) {
        let url = assets.url(&hero.image_ref);
        set_attr_if(page, banner, "src", &url);
        set_attr_if(page, banner, HERO_IMAGE_ATTR, &url);
    }

    let title = hero.title_parts();
    let lines = [
        (&layout.heading_class, title.heading.as_str()),
        (&layout.name_class, title.name.as_str()),
        (&layout.description_class, hero.description.as_str()),
    ];
    for (class, text) in lines {
        if let Some(el) = page.find_first(header, |n| n.has_class(class)) {
            set_text_if(page, el, text);
        }
    }

    tracing::debug!(%theme, "hero customized");
    true
}

/// Lifts the guard so the next pass rewrites the hero.
pub(crate) fn clear_hero_marker(page: &mut Page, layout: &HostLayout) {
    if let Some(header) = find_header(page, layout) {
        if page.attr(header, HERO_MARKER).is_some() {
            page.remove_attr(header, HERO_MARKER);
        }
    }
}
