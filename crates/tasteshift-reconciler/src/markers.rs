//! Attributes and classes the reconciler writes onto the page.

use tasteshift_page::{NodeId, Page};
use tasteshift_types::ThemeId;

/// Active theme. Written on the page root, sections and cards.
pub const THEME_ATTR: &str = "data-theme";
/// Section id on a located section selector.
pub const SECTION_ATTR: &str = "data-section";
/// Display name on a paired card.
pub const ITEM_ATTR: &str = "data-item";
/// Resolved picture URL on a card carrying an override.
pub const OVERRIDE_IMAGE_ATTR: &str = "data-override-image";
/// Hero block guard. Its value is the theme the block was written for.
pub const HERO_MARKER: &str = "data-hero-customized";
pub const HERO_IMAGE_ATTR: &str = "data-hero-image";

/// Any element inserted by us rather than the host.
pub const OWNED_ATTR: &str = "data-tasteshift-owned";

pub const INFO_BUTTON_CLASS: &str = "tasteshift-info-button";
pub const INFO_ITEM_ATTR: &str = "data-info-item";
pub const INFO_COUNTRY_ATTR: &str = "data-info-country";

pub const BACKGROUND_IMAGE: &str = "background-image";

/// Reads the active theme from the page root.
pub fn read_theme(page: &Page) -> Option<ThemeId> {
    page.attr(page.root(), THEME_ATTR)?.parse().ok()
}

pub(crate) fn css_url(url: &str) -> String {
    format!("url({url})")
}

pub(crate) fn set_attr_if(page: &mut Page, id: NodeId, name: &str, value: &str) -> bool {
    if page.attr(id, name) == Some(value) {
        return false;
    }
    page.set_attr(id, name, value)
}

pub(crate) fn set_style_if(page: &mut Page, id: NodeId, property: &str, value: &str) -> bool {
    if page.style(id, property) == Some(value) {
        return false;
    }
    page.set_style(id, property, value)
}

/// Compares against the trimmed text content, the way a reader sees it.
pub(crate) fn set_text_if(page: &mut Page, id: NodeId, text: &str) -> bool {
    if page.text_content(id).trim() == text {
        return false;
    }
    page.set_text(id, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_before_write_skips_equal_values() {
        let mut page = Page::new();
        let body = page.body();
        assert!(set_attr_if(&mut page, body, THEME_ATTR, "italian"));
        let writes = page.writes();
        assert!(!set_attr_if(&mut page, body, THEME_ATTR, "italian"));
        assert_eq!(page.writes(), writes);

        assert!(set_style_if(&mut page, body, "color", "red"));
        assert!(!set_style_if(&mut page, body, "color", "red"));
        assert_eq!(page.writes(), writes + 1);
    }

    #[test]
    fn read_theme_parses_root_attribute() {
        let mut page = Page::new();
        assert_eq!(read_theme(&page), None);
        let root = page.root();
        page.set_attr(root, THEME_ATTR, "bronx");
        assert_eq!(read_theme(&page), Some(ThemeId::Bronx));
        page.set_attr(root, THEME_ATTR, "klingon");
        assert_eq!(read_theme(&page), None);
    }
}
