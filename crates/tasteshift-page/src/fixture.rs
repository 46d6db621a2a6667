//! A page shaped like the host meal builder, for tests and the headless
//! harness.
//!
//! The layout mirrors what the host renders: a `.meal-builder-header` hero
//! block followed by one `.item-category` block per menu section, each
//! holding an `.item-selector` with a `.title` and a `.cards` container of
//! `.meal-builder-item-selector-card-container` cards. The helpers at the
//! bottom reproduce the host's habit of resetting its own markup.

use crate::{NodeId, Page};

/// One section block rendered by the host.
#[derive(Debug, Clone, Copy)]
pub struct HostSection {
    /// Value of `data-analytics-section`, if the host sets one.
    pub marker: Option<&'static str>,
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const HOST_HERO_HEADING: &str = "BUILD YOUR";
pub const HOST_HERO_NAME: &str = "Burrito Bowl";
pub const HOST_HERO_DESCRIPTION: &str =
    "Your choice of freshly grilled meat or sofritas served in a delicious bowl.";
pub const HOST_HERO_IMAGE: &str = "https://host.example/menu/burrito-bowl.jpg";

pub const HOST_SECTIONS: &[HostSection] = &[
    HostSection {
        marker: Some("protein-or-veggie"),
        title: "Choose Your Protein or Veggie",
        items: &["Chicken", "Steak", "Barbacoa", "Carnitas", "Sofritas", "Veggie"],
    },
    HostSection {
        marker: Some("rice"),
        title: "Rice",
        items: &["White Rice", "Brown Rice", "No Rice"],
    },
    HostSection {
        marker: Some("beans"),
        title: "Beans",
        items: &["Black Beans", "Pinto Beans"],
    },
    HostSection {
        marker: None,
        title: "Top Things Off",
        items: &[
            "Fresh Tomato Salsa",
            "Roasted Chili-Corn Salsa",
            "Tomatillo-Green Chili Salsa",
            "Sour Cream",
            "Cheese",
            "Romaine Lettuce",
        ],
    },
    HostSection {
        marker: Some("chips-and-dips"),
        title: "Chips & Dips",
        items: &["Chips", "Chips & Guacamole"],
    },
    HostSection {
        marker: Some("single-side"),
        title: "Sides",
        items: &["Side of Guacamole", "Side of Queso"],
    },
    HostSection {
        marker: Some("drinks"),
        title: "Drinks",
        items: &["Mexican Coca-Cola", "Lemonade"],
    },
];

/// Host image URL for a host item name.
pub fn host_image(name: &str) -> String {
    let slug: String = name
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect();
    format!("https://host.example/menu/{slug}.jpg")
}

/// Builds the full host menu page.
pub fn host_menu_page() -> Page {
    let mut page = Page::new();
    let body = page.body();
    let header = build_header(&mut page);
    attach(&mut page, body, header);
    for section in HOST_SECTIONS {
        let block = build_section(&mut page, section);
        attach(&mut page, body, block);
    }
    page
}

/// Builds a detached host card for `name`.
pub fn host_card(page: &mut Page, name: &str) -> NodeId {
    let card = page.create_element("div");
    page.add_class(card, "meal-builder-item-selector-card-container");
    page.set_attr(card, "data-qa-item-name", name);
    page.set_attr(card, "data-qa-title", name);
    page.set_style(card, "background-image", &format!("url({})", host_image(name)));

    let inner = page.create_element("div");
    page.add_class(inner, "card");
    page.set_attr(inner, "aria-label", &format!("You can select {name}"));
    attach(page, card, inner);

    let label = page.create_element("div");
    page.add_class(label, "item-name");
    page.set_text(label, name);
    attach(page, inner, label);

    let button = page.create_element("button");
    page.set_attr(button, "data-qa-item-name-title", name);
    attach(page, inner, button);

    card
}

/// The `.item-selector` for a host section, found by title.
pub fn selector_by_title(page: &Page, title: &str) -> Option<NodeId> {
    page.find_all(page.body(), |n| n.has_class("item-selector"))
        .into_iter()
        .find(|&selector| {
            page.find_first(selector, |n| n.has_class("title"))
                .map(|t| page.text_content(t).trim() == title)
                .unwrap_or(false)
        })
}

/// Throws away every card of a section and renders fresh host cards, the
/// way the host re-renders a list. Returns the new card ids.
pub fn rerender_section(page: &mut Page, title: &str) -> Vec<NodeId> {
    let Some(section) = HOST_SECTIONS.iter().find(|s| s.title == title) else {
        return Vec::new();
    };
    let Some(selector) = selector_by_title(page, title) else {
        return Vec::new();
    };
    let Some(cards) = page.find_first(selector, |n| n.has_class("cards")) else {
        return Vec::new();
    };
    for child in page.children(cards).to_vec() {
        page.remove(child);
    }
    section
        .items
        .iter()
        .map(|name| {
            let card = host_card(page, name);
            attach(page, cards, card);
            card
        })
        .collect()
}

/// Resets the background image of every card in place to the host value,
/// keeping the card elements themselves.
pub fn reset_card_images(page: &mut Page) {
    let cards = page.find_all(page.body(), |n| {
        n.has_class("meal-builder-item-selector-card-container")
    });
    for card in cards {
        let name = page.attr(card, "data-qa-item-name").map(str::to_string);
        let value = format!("url({})", host_image(name.as_deref().unwrap_or("item")));
        page.set_style(card, "background-image", &value);
    }
}

fn build_header(page: &mut Page) -> NodeId {
    let header = page.create_element("div");
    page.add_class(header, "meal-builder-header");

    let banner = page.create_element("img");
    page.add_class(banner, "banner-image");
    page.set_attr(banner, "src", HOST_HERO_IMAGE);
    attach(page, header, banner);

    for (class, text) in [
        ("heading", HOST_HERO_HEADING),
        ("name", HOST_HERO_NAME),
        ("description", HOST_HERO_DESCRIPTION),
    ] {
        let el = page.create_element("div");
        page.add_class(el, class);
        page.set_text(el, text);
        attach(page, header, el);
    }
    header
}

fn build_section(page: &mut Page, section: &HostSection) -> NodeId {
    let block = page.create_element("div");
    page.add_class(block, "item-category");

    let selector = page.create_element("div");
    page.add_class(selector, "item-selector");
    page.set_attr(
        selector,
        "data-analytics-section",
        section.marker.unwrap_or_default(),
    );
    attach(page, block, selector);

    let title = page.create_element("div");
    page.add_class(title, "title");
    page.set_text(title, section.title);
    attach(page, selector, title);

    let cards = page.create_element("div");
    page.add_class(cards, "cards");
    attach(page, selector, cards);

    for name in section.items {
        let card = host_card(page, name);
        attach(page, cards, card);
    }
    block
}

fn attach(page: &mut Page, parent: NodeId, child: NodeId) {
    if let Err(err) = page.append_child(parent, child) {
        tracing::warn!(%parent, %child, error = %err, "fixture append failed");
    }
}
