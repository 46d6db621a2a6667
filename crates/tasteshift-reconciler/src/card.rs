//! Writes onto a single host card.

use tasteshift_page::{NodeId, Page};
use tasteshift_types::{AssetBase, MenuItem};

use crate::layout::HostLayout;
use crate::markers::{
    css_url, set_attr_if, set_style_if, set_text_if, BACKGROUND_IMAGE, INFO_BUTTON_CLASS,
    INFO_COUNTRY_ATTR, INFO_ITEM_ATTR, ITEM_ATTR, OVERRIDE_IMAGE_ATTR, OWNED_ATTR,
};

const SELECT_PREFIX: &str = "You can select ";

/// Rendered name of a card: trimmed text of its item-name element.
pub(crate) fn card_name(page: &Page, layout: &HostLayout, card: NodeId) -> Option<String> {
    let label = page.find_first(card, |n| n.has_class(&layout.item_name_class))?;
    Some(page.text_content(label).trim().to_string())
}

/// Writes picture, name and auxiliary attributes of `item` onto `card`.
/// Returns the number of values that actually changed.
pub(crate) fn write_card(
    page: &mut Page,
    layout: &HostLayout,
    assets: &AssetBase,
    card: NodeId,
    item: &MenuItem,
) -> usize {
    let name = item.display_name.as_str();
    let image_url = assets.picture(&item.image_ref);
    let mut writes = 0;

    writes += usize::from(set_style_if(page, card, BACKGROUND_IMAGE, &css_url(&image_url)));
    writes += usize::from(set_attr_if(page, card, OVERRIDE_IMAGE_ATTR, &image_url));
    writes += usize::from(set_attr_if(page, card, ITEM_ATTR, name));

    if let Some(label) = page.find_first(card, |n| n.has_class(&layout.item_name_class)) {
        writes += usize::from(set_text_if(page, label, name));
    }

    if page.attr(card, "data-qa-item-name").is_some() {
        writes += usize::from(set_attr_if(page, card, "data-qa-item-name", name));
        writes += usize::from(set_attr_if(page, card, "data-qa-title", name));
    }

    if let Some(inner) = page.find_first(card, |n| n.has_class(&layout.inner_card_class)) {
        let relabel = page
            .attr(inner, "aria-label")
            .filter(|label| label.starts_with(SELECT_PREFIX))
            .map(|_| format!("{SELECT_PREFIX}{name}"));
        if let Some(label) = relabel {
            writes += usize::from(set_attr_if(page, inner, "aria-label", &label));
        }
    }

    let title_attr = layout.name_title_attr.as_str();
    if let Some(button) = page.find_first(card, |n| n.has_attr(title_attr)) {
        writes += usize::from(set_attr_if(page, button, title_attr, name));
    }

    writes += ensure_info_button(page, assets, card, name, item.country_tag());
    writes
}

/// Makes sure `card` carries exactly one detail button for `name`.
/// Returns the number of buttons removed or added.
pub(crate) fn ensure_info_button(
    page: &mut Page,
    assets: &AssetBase,
    card: NodeId,
    name: &str,
    country: &str,
) -> usize {
    let existing = page.find_all(card, |n| n.has_class(INFO_BUTTON_CLASS));
    let current = existing.iter().copied().find(|&button| {
        page.attr(button, INFO_ITEM_ATTR) == Some(name)
            && page.attr(button, INFO_COUNTRY_ATTR) == Some(country)
    });
    let mut writes = 0;
    for button in existing {
        if Some(button) != current {
            page.remove(button);
            writes += 1;
        }
    }
    if current.is_some() {
        return writes;
    }

    let label = format!("Learn about {name}");
    let button = page.create_element("button");
    page.add_class(button, INFO_BUTTON_CLASS);
    page.set_attr(button, OWNED_ATTR, "");
    page.set_attr(button, "type", "button");
    page.set_attr(button, "aria-label", &label);
    page.set_attr(button, "title", &label);
    page.set_attr(button, INFO_ITEM_ATTR, name);
    page.set_attr(button, INFO_COUNTRY_ATTR, country);

    let icon = page.create_element("img");
    page.set_attr(icon, "src", &assets.url("info-icon.png"));
    page.set_attr(icon, "alt", "Info");
    page.set_attr(icon, "aria-hidden", "true");

    if page.append_child(button, icon).is_err() || page.append_child(card, button).is_err() {
        tracing::debug!(%card, "card vanished before detail button could be attached");
        page.remove(button);
        return writes;
    }
    tracing::debug!(%card, item = name, "attached detail button");
    writes + 1
}

/// Whether `card` has a detail button at all.
pub(crate) fn has_info_button(page: &Page, card: NodeId) -> bool {
    page.find_first(card, |n| n.has_class(INFO_BUTTON_CLASS)).is_some()
}
