//! Deciding what a batch of page mutations asks of the reconciler.

use tasteshift_page::{MutationKind, MutationRecord, NodeId, Page};

use crate::markers::{BACKGROUND_IMAGE, HERO_MARKER, OWNED_ATTR};
use crate::overrides::OverrideTable;

/// Work requested by observed mutations, ordered by cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Trigger {
    Ignore,
    /// A known card had its background or name touched.
    FastPath,
    /// The host added elements.
    FullPass,
}

/// Classifies a batch of records.
///
/// Records targeting the marked hero block or anything we inserted
/// ourselves are ignored. Added host elements ask for a full pass; a
/// background or text change on a card we already customized asks for the
/// fast path only.
pub fn classify(page: &Page, overrides: &OverrideTable, records: &[MutationRecord]) -> Trigger {
    records
        .iter()
        .map(|record| classify_one(page, overrides, record))
        .max()
        .unwrap_or(Trigger::Ignore)
}

fn classify_one(page: &Page, overrides: &OverrideTable, record: &MutationRecord) -> Trigger {
    if !page.contains(record.target) || is_ours(page, record.target) {
        return Trigger::Ignore;
    }
    match &record.kind {
        MutationKind::ChildList { added, .. } => {
            let foreign = added
                .iter()
                .any(|&node| page.contains(node) && !is_ours(page, node));
            if foreign {
                Trigger::FullPass
            } else {
                Trigger::Ignore
            }
        }
        MutationKind::Style(property)
            if property == BACKGROUND_IMAGE && overrides.get(record.target).is_some() =>
        {
            Trigger::FastPath
        }
        MutationKind::Text
            if page
                .closest(record.target, |n| overrides.get(n.id()).is_some())
                .is_some() =>
        {
            Trigger::FastPath
        }
        _ => Trigger::Ignore,
    }
}

fn is_ours(page: &Page, node: NodeId) -> bool {
    page.closest(node, |n| n.has_attr(HERO_MARKER) || n.has_attr(OWNED_ATTR))
        .is_some()
}
