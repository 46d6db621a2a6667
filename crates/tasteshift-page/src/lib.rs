//! In-memory model of the host menu page.
//!
//! The host page is a tree of element nodes owned by an arena. Nodes are
//! addressed by [`NodeId`], a synthetic id that is never reused, so tables
//! keyed by it never keep a removed element alive: once a subtree is
//! removed its ids simply stop resolving.
//!
//! Every setter behaves like the browser DOM: it counts as a write and
//! produces a [`MutationRecord`] even when the new value equals the old
//! one. Callers that want idempotent passes must compare before writing.
//! [`Page::writes`] exposes the running write count for exactly that check.

pub mod fixture;
mod node;

use std::collections::HashMap;

use tokio::sync::mpsc;

pub use node::Node;

/// Synthetic element id. Unique for the lifetime of a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// What changed on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    ChildList {
        added: Vec<NodeId>,
        removed: Vec<NodeId>,
    },
    Attribute(String),
    Style(String),
    Class(String),
    Text,
}

/// A single change delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: NodeId,
    pub kind: MutationKind,
}

/// Errors from structural page operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no such node: {0}")]
    NoSuchNode(NodeId),

    #[error("cannot append {child} under its own descendant {parent}")]
    Cycle { parent: NodeId, child: NodeId },
}

/// The page: a node arena rooted at the document element.
#[derive(Debug)]
pub struct Page {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    body: NodeId,
    next_id: u64,
    writes: u64,
    scroll_y: u32,
    observers: Vec<mpsc::UnboundedSender<MutationRecord>>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// An empty document: `<html><body></body></html>`.
    pub fn new() -> Self {
        let mut page = Self {
            nodes: HashMap::new(),
            root: NodeId(0),
            body: NodeId(0),
            next_id: 0,
            writes: 0,
            scroll_y: 0,
            observers: Vec::new(),
        };
        page.root = page.alloc("html");
        page.body = page.alloc("body");
        page.link(page.root, page.body);
        page
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Total number of writes performed since the page was created.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, y: u32) {
        self.scroll_y = y;
    }

    /// Subscribes to mutation records of attached nodes.
    pub fn observe(&mut self) -> mpsc::UnboundedReceiver<MutationRecord> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Whether the node exists and is connected to the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cursor) = current {
            if cursor == self.root {
                return true;
            }
            current = self.nodes.get(&cursor).and_then(|n| n.parent);
        }
        false
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Creates a detached element. Attach it with [`Page::append_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(tag)
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), PageError> {
        if !self.contains(parent) {
            return Err(PageError::NoSuchNode(parent));
        }
        if !self.contains(child) {
            return Err(PageError::NoSuchNode(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(PageError::Cycle { parent, child });
        }
        if let Some(old_parent) = self.parent(child) {
            self.unlink(old_parent, child);
            self.record(
                old_parent,
                MutationKind::ChildList {
                    added: Vec::new(),
                    removed: vec![child],
                },
            );
        }
        self.link(parent, child);
        self.record(
            parent,
            MutationKind::ChildList {
                added: vec![child],
                removed: Vec::new(),
            },
        );
        Ok(())
    }

    /// Removes a node and its whole subtree from the page. Ids of the removed
    /// nodes stop resolving. Returns `false` if the node did not exist.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        let parent = self.parent(id);
        if let Some(parent) = parent {
            // record while the parent is still known to be attached
            self.record(
                parent,
                MutationKind::ChildList {
                    added: Vec::new(),
                    removed: vec![id],
                },
            );
            self.unlink(parent, id);
        } else {
            self.writes += 1;
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
        }
        true
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(&id)?.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.attrs.insert(name.to_string(), value.to_string());
        self.record(id, MutationKind::Attribute(name.to_string()));
        true
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.attrs.remove(name);
        self.record(id, MutationKind::Attribute(name.to_string()));
        true
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes.get(&id)?.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.styles.insert(property.to_string(), value.to_string());
        self.record(id, MutationKind::Style(property.to_string()));
        true
    }

    /// Own text of a node. Children are unaffected.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.text.as_str())
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.text = text.to_string();
        self.record(id, MutationKind::Text);
        true
    }

    /// Own text of the node followed by the text of its descendants in
    /// document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.walk(id, &mut |node| out.push_str(&node.text));
        out
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        self.record(id, MutationKind::Class(class.to_string()));
        true
    }

    /// Descendants of `scope` (excluding `scope`) matching `pred`, in
    /// document order.
    pub fn find_all(&self, scope: NodeId, pred: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &child in self.children(scope) {
            self.walk(child, &mut |node| {
                if pred(node) {
                    out.push(node.id);
                }
            });
        }
        out
    }

    /// First descendant of `scope` matching `pred`.
    pub fn find_first(&self, scope: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(&id)?;
            if pred(node) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Nearest inclusive ancestor of `id` matching `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(cursor) = current {
            let node = self.nodes.get(&cursor)?;
            if pred(node) {
                return Some(cursor);
            }
            current = node.parent;
        }
        None
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, tag));
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cursor) = current {
            if cursor == ancestor {
                return true;
            }
            current = self.parent(cursor);
        }
        false
    }

    fn walk<'a>(&'a self, id: NodeId, visit: &mut impl FnMut(&'a Node)) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get(&next) {
                visit(node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    fn record(&mut self, target: NodeId, kind: MutationKind) {
        self.writes += 1;
        if self.observers.is_empty() || !self.is_attached(target) {
            return;
        }
        let record = MutationRecord { target, kind };
        self.observers.retain(|tx| tx.send(record.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div_with_class(page: &mut Page, parent: NodeId, class: &str) -> NodeId {
        let id = page.create_element("div");
        page.add_class(id, class);
        page.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn find_all_returns_document_order() {
        let mut page = Page::new();
        let body = page.body();
        let a = div_with_class(&mut page, body, "card");
        let a1 = div_with_class(&mut page, a, "card");
        let b = div_with_class(&mut page, body, "card");

        let found = page.find_all(body, |n| n.has_class("card"));
        assert_eq!(found, vec![a, a1, b]);
        assert_eq!(page.find_first(body, |n| n.has_class("card")), Some(a));
    }

    #[test]
    fn removed_subtree_ids_stop_resolving() {
        let mut page = Page::new();
        let body = page.body();
        let outer = div_with_class(&mut page, body, "outer");
        let inner = div_with_class(&mut page, outer, "inner");

        assert!(page.is_attached(inner));
        assert!(page.remove(outer));
        assert!(!page.contains(inner));
        assert!(!page.is_attached(inner));
        assert!(!page.set_attr(inner, "data-x", "1"));
        assert!(page.children(body).is_empty());
    }

    #[test]
    fn detached_element_is_not_attached() {
        let mut page = Page::new();
        let loose = page.create_element("span");
        assert!(page.contains(loose));
        assert!(!page.is_attached(loose));
    }

    #[test]
    fn closest_includes_self() {
        let mut page = Page::new();
        let body = page.body();
        let block = div_with_class(&mut page, body, "item-category");
        let inner = div_with_class(&mut page, block, "item-selector");

        assert_eq!(page.closest(inner, |n| n.has_class("item-category")), Some(block));
        assert_eq!(page.closest(block, |n| n.has_class("item-category")), Some(block));
        assert_eq!(page.closest(inner, |n| n.has_class("missing")), None);
    }

    #[test]
    fn every_setter_counts_as_write_even_when_unchanged() {
        let mut page = Page::new();
        let body = page.body();
        let before = page.writes();
        page.set_attr(body, "data-theme", "italian");
        page.set_attr(body, "data-theme", "italian");
        page.set_style(body, "display", "block");
        page.set_text(body, "");
        assert_eq!(page.writes(), before + 4);
    }

    #[test]
    fn cycle_is_rejected() {
        let mut page = Page::new();
        let body = page.body();
        let outer = div_with_class(&mut page, body, "outer");
        let inner = div_with_class(&mut page, outer, "inner");

        assert_eq!(
            page.append_child(inner, outer),
            Err(PageError::Cycle {
                parent: inner,
                child: outer
            })
        );
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let mut page = Page::new();
        let body = page.body();
        let outer = div_with_class(&mut page, body, "outer");
        let inner = div_with_class(&mut page, outer, "inner");
        page.set_text(outer, "Chicken ");
        page.set_text(inner, "Bowl");
        assert_eq!(page.text_content(outer), "Chicken Bowl");
    }

    #[tokio::test]
    async fn observers_see_only_attached_mutations() {
        let mut page = Page::new();
        let mut rx = page.observe();
        let loose = page.create_element("div");
        page.set_attr(loose, "data-x", "1");
        assert!(rx.try_recv().is_err());

        let body = page.body();
        page.append_child(body, loose).unwrap();
        page.set_attr(loose, "data-x", "2");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.target, body);
        assert!(matches!(first.kind, MutationKind::ChildList { .. }));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.target, loose);
        assert_eq!(second.kind, MutationKind::Attribute("data-x".to_string()));
    }
}
