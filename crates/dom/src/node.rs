//! DOM Node implementation.

use crate::element::ElementData;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for a DOM node.
    pub struct NodeId;
}

/// Type of DOM node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Document,
}

/// Data specific to each node type.
#[derive(Clone, Debug)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text { content: String },
}

/// A DOM node.
#[derive(Clone, Debug)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Node type.
    pub node_type: NodeType,
    /// Node-specific data.
    pub data: NodeData,
    /// Parent node.
    pub parent: Option<NodeId>,
    /// Child nodes.
    pub children: SmallVec<[NodeId; 8]>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, data: NodeData) -> Self {
        Self {
            id,
            node_type,
            data,
            parent: None,
            children: SmallVec::new(),
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn new_document(id: NodeId) -> Self {
        Self::new(id, NodeType::Document, NodeData::Document)
    }

    pub fn new_element(id: NodeId, data: ElementData) -> Self {
        Self::new(id, NodeType::Element, NodeData::Element(data))
    }

    pub fn new_text(id: NodeId, content: String) -> Self {
        Self::new(id, NodeType::Text, NodeData::Text { content })
    }

    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Get element data if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable element data if this is an element.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    #[inline]
    pub fn last_child(&self) -> Option<NodeId> {
        self.children.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementData, TagName};
    use slotmap::SlotMap;

    #[test]
    fn test_node_kinds() {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let li = nodes.insert_with_key(|id| Node::new_element(id, ElementData::new(TagName::li())));
        let text = nodes.insert_with_key(|id| Node::new_text(id, "Apple".to_string()));

        assert!(nodes[li].is_element());
        assert_eq!(nodes[li].as_element().map(|e| e.tag_name.as_str()), Some("li"));
        assert!(!nodes[text].is_element());
        assert_eq!(nodes[text].node_type, NodeType::Text);
        assert!(nodes[text].as_element().is_none());
    }

    #[test]
    fn test_child_links() {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let ul = nodes.insert_with_key(|id| Node::new_element(id, ElementData::new(TagName::ul())));
        assert_eq!(nodes[ul].first_child(), None);

        let a = nodes.insert_with_key(|id| Node::new_text(id, "a".to_string()));
        let b = nodes.insert_with_key(|id| Node::new_text(id, "b".to_string()));
        nodes[ul].children.push(a);
        nodes[ul].children.push(b);
        assert_eq!(nodes[ul].first_child(), Some(a));
        assert_eq!(nodes[ul].last_child(), Some(b));
    }
}
