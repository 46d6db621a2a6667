//! Controls we render into the host page: the cuisine selector and the
//! avatar clip.

use std::sync::{Arc, Mutex};

use tasteshift_page::{NodeId, Page};
use tasteshift_reconciler::markers::OWNED_ATTR;
use tasteshift_types::{AssetBase, ThemeId};
use tasteshift_voice::AvatarControl;

pub const SELECTOR_CLASS: &str = "tasteshift-cuisine-selector";
pub const SELECT_ID: &str = "tasteshift-cuisine-select";
pub const AVATAR_CLASS: &str = "tasteshift-avatar";
/// `playing` or `paused` on the avatar's video element.
pub const AVATAR_STATE_ATTR: &str = "data-state";

/// Renders the cuisine selector once and points it at `theme`. Returns the
/// `select` element.
pub fn mount_selector(page: &mut Page, theme: ThemeId) -> NodeId {
    if let Some(select) = find_select(page) {
        sync_selector(page, theme);
        return select;
    }

    let wrapper = page.create_element("div");
    page.add_class(wrapper, SELECTOR_CLASS);
    page.set_attr(wrapper, OWNED_ATTR, "");

    let label = page.create_element("label");
    page.set_attr(label, "for", SELECT_ID);
    page.set_text(label, "Cuisine:");

    let select = page.create_element("select");
    page.set_attr(select, "id", SELECT_ID);
    page.set_attr(select, "value", theme.as_str());
    for option_theme in ThemeId::ALL {
        let option = page.create_element("option");
        page.set_attr(option, "value", option_theme.as_str());
        page.set_text(option, option_theme.label());
        let _ = page.append_child(select, option);
    }

    let _ = page.append_child(wrapper, label);
    let _ = page.append_child(wrapper, select);
    let body = page.body();
    if let Err(e) = page.append_child(body, wrapper) {
        tracing::warn!(error = %e, "could not attach cuisine selector");
    }
    select
}

/// Points an existing selector at `theme`.
pub fn sync_selector(page: &mut Page, theme: ThemeId) {
    if let Some(select) = find_select(page) {
        if page.attr(select, "value") != Some(theme.as_str()) {
            page.set_attr(select, "value", theme.as_str());
        }
    }
}

/// Whether `node` is our selector (or one of its options).
pub fn is_selector(page: &Page, node: NodeId) -> bool {
    page.closest(node, |n| n.attr("id") == Some(SELECT_ID)).is_some()
}

fn find_select(page: &Page) -> Option<NodeId> {
    page.find_first(page.root(), |n| n.attr("id") == Some(SELECT_ID))
}

/// Replaces the avatar for `theme`. Themes without a clip get none.
/// Returns the video element.
pub fn mount_avatar(page: &mut Page, assets: &AssetBase, theme: ThemeId) -> Option<NodeId> {
    for existing in page.find_all(page.root(), |n| n.has_class(AVATAR_CLASS)) {
        page.remove(existing);
    }
    if !theme.has_avatar() {
        tracing::debug!(%theme, "theme has no avatar clip");
        return None;
    }

    let container = page.create_element("div");
    page.add_class(container, AVATAR_CLASS);
    page.set_attr(container, OWNED_ATTR, "");

    let video = page.create_element("video");
    page.set_attr(video, "src", &assets.avatar_clip(theme));
    page.set_attr(video, "muted", "");
    page.set_attr(video, "playsinline", "");
    page.set_attr(video, AVATAR_STATE_ATTR, "paused");
    let _ = page.append_child(container, video);

    let body = page.body();
    match page.append_child(body, container) {
        Ok(()) => {
            tracing::debug!(%theme, "avatar mounted");
            Some(video)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not attach avatar");
            None
        }
    }
}

/// [`AvatarControl`] over the video element mounted by [`mount_avatar`].
#[derive(Clone)]
pub struct PageAvatar {
    page: Arc<Mutex<Page>>,
}

impl PageAvatar {
    pub fn new(page: Arc<Mutex<Page>>) -> Self {
        Self { page }
    }

    fn set_state(&self, state: &str) {
        let mut page = self.page.lock().unwrap_or_else(|e| e.into_inner());
        let Some(video) = page.find_first(page.root(), |n| {
            n.tag() == "video" && n.has_attr(AVATAR_STATE_ATTR)
        }) else {
            return;
        };
        if page.attr(video, AVATAR_STATE_ATTR) != Some(state) {
            page.set_attr(video, AVATAR_STATE_ATTR, state);
        }
    }
}

impl AvatarControl for PageAvatar {
    fn play(&self, theme: ThemeId) {
        tracing::debug!(%theme, "avatar playing");
        self.set_state("playing");
    }

    fn reset(&self) {
        self.set_state("paused");
    }
}
