//! The item detail panel opened from a card's detail button.

use tasteshift_lookup::{InfoSection, LookupError, LookupResult};
use tasteshift_page::{NodeId, Page};
use tasteshift_reconciler::markers::OWNED_ATTR;

pub const OVERLAY_CLASS: &str = "tasteshift-info-overlay";
pub const CLOSE_CLASS: &str = "tasteshift-info-close";
pub const CONTENT_CLASS: &str = "tasteshift-info-content";
pub const LOADING_CLASS: &str = "tasteshift-info-loading";
pub const ERROR_CLASS: &str = "tasteshift-info-error";
pub const SECTION_CLASS: &str = "tasteshift-info-section";
pub const SOURCE_CLASS: &str = "tasteshift-info-source";

/// Opens the panel for one item in its loading state, replacing any panel
/// already open. Returns the overlay element.
pub fn open(page: &mut Page, item: &str) -> NodeId {
    close(page);

    let overlay = page.create_element("div");
    page.add_class(overlay, OVERLAY_CLASS);
    page.set_attr(overlay, OWNED_ATTR, "");

    let modal = page.create_element("div");
    page.add_class(modal, "tasteshift-info-modal");
    page.set_attr(modal, "role", "dialog");
    page.set_attr(modal, "aria-label", item);

    let header = page.create_element("div");
    page.add_class(header, "tasteshift-info-header");
    let title = element(page, "h2", "tasteshift-info-title", item);
    let close_button = element(page, "button", CLOSE_CLASS, "\u{d7}");
    page.set_attr(close_button, "aria-label", "Close");
    attach(page, header, &[title, close_button]);

    let content = page.create_element("div");
    page.add_class(content, CONTENT_CLASS);
    let loading = element(
        page,
        "div",
        LOADING_CLASS,
        &format!("Loading information about {item}..."),
    );
    attach(page, content, &[loading]);

    attach(page, modal, &[header, content]);
    attach(page, overlay, &[modal]);
    let body = page.body();
    attach(page, body, &[overlay]);
    overlay
}

/// Removes the open panel. Returns whether one was open.
pub fn close(page: &mut Page) -> bool {
    let open = page.find_all(page.root(), |n| n.has_class(OVERLAY_CLASS));
    let closed = !open.is_empty();
    for overlay in open {
        page.remove(overlay);
    }
    closed
}

pub fn current(page: &Page) -> Option<NodeId> {
    page.find_first(page.root(), |n| n.has_class(OVERLAY_CLASS))
}

/// Whether a click on `target` should close the panel: the overlay
/// backdrop itself or the close button.
pub fn is_dismiss_target(page: &Page, target: NodeId) -> bool {
    let Some(node) = page.node(target) else {
        return false;
    };
    node.has_class(OVERLAY_CLASS)
        || page.closest(target, |n| n.has_class(CLOSE_CLASS)).is_some()
}

/// Fills the panel with a lookup outcome. Does nothing when `overlay` was
/// closed in the meantime.
pub fn render(
    page: &mut Page,
    overlay: NodeId,
    item: &str,
    country: &str,
    outcome: &Result<LookupResult, LookupError>,
) -> bool {
    if !page.is_attached(overlay) {
        tracing::debug!(item, "detail panel closed before lookup finished");
        return false;
    }
    let Some(content) = page.find_first(overlay, |n| n.has_class(CONTENT_CLASS)) else {
        return false;
    };
    for loading in page.find_all(content, |n| n.has_class(LOADING_CLASS)) {
        page.remove(loading);
    }

    match outcome {
        Ok(result) => {
            let general = section(page, &format!("What are {item}?"), &result.info.general);
            let cultural = section(
                page,
                &format!("How it's prepared in {}", capitalize(country)),
                &result.info.cultural,
            );
            attach(page, content, &[general, cultural]);
        }
        Err(err) => {
            let message = element(page, "div", ERROR_CLASS, &err.to_string());
            attach(page, content, &[message]);
        }
    }
    true
}

fn section(page: &mut Page, heading: &str, info: &InfoSection) -> NodeId {
    let wrapper = page.create_element("div");
    page.add_class(wrapper, SECTION_CLASS);
    let title = element(page, "h3", "tasteshift-info-section-title", heading);
    let answer = element(page, "div", "tasteshift-info-section-content", &info.answer);
    attach(page, wrapper, &[title, answer]);

    if !info.sources.is_empty() {
        let sources = page.create_element("div");
        page.add_class(sources, "tasteshift-info-sources");
        let label = element(page, "strong", "tasteshift-info-sources-label", "Sources:");
        attach(page, sources, &[label]);
        for source in &info.sources {
            let text = if source.title.is_empty() {
                source.url.as_str()
            } else {
                source.title.as_str()
            };
            let link = element(page, "a", "tasteshift-info-link", text);
            page.set_attr(link, "href", &source.url);
            page.set_attr(link, "target", "_blank");
            page.set_attr(link, "rel", "noopener noreferrer");
            let row = page.create_element("div");
            page.add_class(row, SOURCE_CLASS);
            attach(page, row, &[link]);
            attach(page, sources, &[row]);
        }
        attach(page, wrapper, &[sources]);
    }
    wrapper
}

fn element(page: &mut Page, tag: &str, class: &str, text: &str) -> NodeId {
    let node = page.create_element(tag);
    page.add_class(node, class);
    page.set_text(node, text);
    node
}

fn attach(page: &mut Page, parent: NodeId, children: &[NodeId]) {
    for &child in children {
        if let Err(e) = page.append_child(parent, child) {
            tracing::debug!(error = %e, "detail panel element not attached");
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasteshift_lookup::{FoodInfo, Source};

    fn answered() -> Result<LookupResult, LookupError> {
        Ok(LookupResult {
            info: FoodInfo {
                food_name: Some("Jerk Chicken".into()),
                country: Some("jamaican".into()),
                general: InfoSection {
                    answer: "Spiced grilled chicken.".into(),
                    sources: vec![Source {
                        title: String::new(),
                        url: "https://example.test/jerk".into(),
                    }],
                },
                cultural: InfoSection {
                    answer: "Smoked over pimento wood.".into(),
                    sources: Vec::new(),
                },
                stale: false,
            },
            cached: true,
        })
    }

    fn texts(page: &Page, scope: NodeId, class: &str) -> Vec<String> {
        page.find_all(scope, |n| n.has_class(class))
            .into_iter()
            .map(|id| page.text_content(id))
            .collect()
    }

    #[test]
    fn loading_then_sections() {
        let mut page = Page::new();
        let overlay = open(&mut page, "Jerk Chicken");
        assert_eq!(
            texts(&page, overlay, LOADING_CLASS),
            vec!["Loading information about Jerk Chicken...".to_string()]
        );

        assert!(render(&mut page, overlay, "Jerk Chicken", "jamaican", &answered()));
        assert!(texts(&page, overlay, LOADING_CLASS).is_empty());
        assert_eq!(
            texts(&page, overlay, "tasteshift-info-section-title"),
            vec![
                "What are Jerk Chicken?".to_string(),
                "How it's prepared in Jamaican".to_string()
            ]
        );
        let link = page
            .find_first(overlay, |n| n.tag() == "a")
            .expect("source link");
        assert_eq!(page.attr(link, "href"), Some("https://example.test/jerk"));
        assert_eq!(page.text_content(link), "https://example.test/jerk");
        assert_eq!(texts(&page, overlay, SOURCE_CLASS).len(), 1);
    }

    #[test]
    fn error_message_is_shown_verbatim() {
        let mut page = Page::new();
        let overlay = open(&mut page, "Oxtail");
        render(&mut page, overlay, "Oxtail", "brooklyn", &Err(LookupError::Timeout));
        assert_eq!(
            texts(&page, overlay, ERROR_CLASS),
            vec!["Request timeout. Please check your backend server is running.".to_string()]
        );
    }

    #[test]
    fn late_result_for_closed_panel_is_dropped() {
        let mut page = Page::new();
        let overlay = open(&mut page, "Oxtail");
        assert!(close(&mut page));
        assert!(!close(&mut page));
        let writes = page.writes();
        assert!(!render(&mut page, overlay, "Oxtail", "brooklyn", &answered()));
        assert_eq!(page.writes(), writes);
    }

    #[test]
    fn reopening_replaces_the_panel() {
        let mut page = Page::new();
        let first = open(&mut page, "Polenta");
        let second = open(&mut page, "Risotto");
        assert!(!page.is_attached(first));
        assert_eq!(current(&page), Some(second));

        let close_button = page
            .find_first(second, |n| n.has_class(CLOSE_CLASS))
            .unwrap();
        assert!(is_dismiss_target(&page, close_button));
        assert!(is_dismiss_target(&page, second));
        let title = page
            .find_first(second, |n| n.has_class("tasteshift-info-title"))
            .unwrap();
        assert!(!is_dismiss_target(&page, title));
    }
}
