//! DOM Document implementation.

use crate::element::{ElementData, TagName};
use crate::node::NodeId;
use crate::tree::DomTree;

/// DOM Document.
pub struct Document {
    /// The DOM tree.
    pub tree: DomTree,
    /// Document element (<html>).
    pub document_element: NodeId,
    /// Head element.
    pub head: NodeId,
    /// Body element.
    pub body: NodeId,
    /// Active element (focused).
    pub active_element: Option<NodeId>,
}

impl Document {
    /// Create a document with an empty `<html><head></head><body></body></html>` skeleton.
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let root = tree.root();

        let html = tree.create_element(ElementData::new(TagName::html()));
        let head = tree.create_element(ElementData::new(TagName::head()));
        let body = tree.create_element(ElementData::new(TagName::body()));
        tree.append_child(root, html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            document_element: html,
            head,
            body,
            active_element: None,
        }
    }

    /// Create an element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.tree
            .create_element(ElementData::new(TagName::new(tag_name)))
    }

    /// Create an element with attributes, in order.
    pub fn create_element_with_attributes(&mut self, tag_name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut data = ElementData::new(TagName::new(tag_name));
        for (name, value) in attrs {
            data.set_attribute(name, value);
        }
        self.tree.create_element(data)
    }

    /// Create a text node.
    pub fn create_text_node(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content.to_string())
    }

    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.tree.query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.tree.query_selector_all(selector)
    }

    /// Append child to body.
    pub fn append_to_body(&mut self, node: NodeId) {
        self.tree.append_child(self.body, node);
    }

    /// Propagation path above `node`, nearest ancestor first.
    pub fn event_path(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.ancestors(node).collect()
    }

    /// Nearest focusable inclusive ancestor of `node`.
    pub fn focusable_ancestor(&self, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .find(|&id| {
                self.tree
                    .get_element(id)
                    .map(|e| e.is_focusable())
                    .unwrap_or(false)
            })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
