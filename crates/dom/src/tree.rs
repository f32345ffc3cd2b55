//! DOM Tree implementation.

use crate::element::ElementData;
use crate::node::{Node, NodeData, NodeId};
use slotmap::SlotMap;
use std::collections::HashMap;

/// The DOM tree structure.
pub struct DomTree {
    /// All nodes in the tree.
    nodes: SlotMap<NodeId, Node>,
    /// Root node (document).
    root: NodeId,
    /// ID to node mapping for fast lookups.
    id_map: HashMap<String, NodeId>,
}

impl DomTree {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert_with_key(Node::new_document);
        Self {
            nodes,
            root,
            id_map: HashMap::new(),
        }
    }

    /// Get the root document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the node still exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get element data for a node.
    pub fn get_element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(|n| n.as_element())
    }

    /// Get mutable element data for a node.
    pub fn get_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(|n| n.as_element_mut())
    }

    /// Create an element node.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.nodes.insert_with_key(|id| Node::new_element(id, data))
    }

    /// Create a text node.
    pub fn create_text(&mut self, content: String) -> NodeId {
        self.nodes.insert_with_key(|id| Node::new_text(id, content))
    }

    /// Append a child to a parent node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove_from_parent(child);

        let last_child = self.nodes.get(parent).and_then(|n| n.last_child());
        if let Some(last) = last_child {
            if let Some(last_node) = self.nodes.get_mut(last) {
                last_node.next_sibling = Some(child);
            }
        }

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }

        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = last_child;
            child_node.next_sibling = None;
        }

        self.update_id_map(child);
    }

    /// Insert a child before a reference node.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let ref_id = match reference {
            None => return self.append_child(parent, child),
            Some(ref_id) => ref_id,
        };

        self.remove_from_parent(child);

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            if let Some(pos) = parent_node.children.iter().position(|&id| id == ref_id) {
                parent_node.children.insert(pos, child);
            }
        }

        let prev = self.nodes.get(ref_id).and_then(|n| n.prev_sibling);

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.nodes.get_mut(prev_id) {
                prev_node.next_sibling = Some(child);
            }
        }

        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = prev;
            child_node.next_sibling = Some(ref_id);
        }

        if let Some(ref_node) = self.nodes.get_mut(ref_id) {
            ref_node.prev_sibling = Some(child);
        }

        self.update_id_map(child);
    }

    /// Insert `node` immediately after `reference` under the same parent.
    ///
    /// Returns false when `reference` has no parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        let parent = match self.parent(reference) {
            Some(p) => p,
            None => return false,
        };
        let next = self.next_sibling(reference);
        self.insert_before(parent, node, next);
        true
    }

    /// Remove a node from its parent.
    pub fn remove_from_parent(&mut self, node: NodeId) {
        let (parent, prev, next) = match self.nodes.get(node) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                parent_node.children.retain(|id| *id != node);
            }
        }

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.nodes.get_mut(prev_id) {
                prev_node.next_sibling = next;
            }
        }
        if let Some(next_id) = next {
            if let Some(next_node) = self.nodes.get_mut(next_id) {
                next_node.prev_sibling = prev;
            }
        }

        if let Some(node_data) = self.nodes.get_mut(node) {
            node_data.parent = None;
            node_data.prev_sibling = None;
            node_data.next_sibling = None;
        }
    }

    /// Remove a node and its subtree from the tree.
    pub fn remove(&mut self, node: NodeId) {
        self.remove_from_parent(node);

        let mut to_remove = vec![node];
        let mut i = 0;
        while i < to_remove.len() {
            if let Some(n) = self.nodes.get(to_remove[i]) {
                to_remove.extend(n.children.iter().copied());
            }
            i += 1;
        }

        for &id in &to_remove {
            let elem_id = self
                .get_element(id)
                .and_then(|e| e.id.as_ref())
                .map(|s| s.to_string());
            if let Some(elem_id) = elem_id {
                if self.id_map.get(&elem_id) == Some(&id) {
                    self.id_map.remove(&elem_id);
                }
            }
        }

        for id in to_remove {
            self.nodes.remove(id);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.first_child())
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.last_child())
    }

    pub fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.prev_sibling)
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.next_sibling)
    }

    /// Get all children.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.children.iter().copied())
    }

    /// Get ancestors, nearest first.
    pub fn ancestors(&self, node: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(node),
        }
    }

    /// Get descendants (pre-order).
    pub fn descendants(&self, node: NodeId) -> DescendantIterator<'_> {
        let mut stack = Vec::new();
        if let Some(n) = self.nodes.get(node) {
            stack.extend(n.children.iter().rev().copied());
        }
        DescendantIterator { tree: self, stack }
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Find element by ID.
    pub fn find_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    /// Find descendant elements of `scope` by tag name (`*` matches all).
    pub fn find_elements_by_tag_name_within(&self, scope: NodeId, tag_name: &str) -> Vec<NodeId> {
        let tag_lower = tag_name.to_ascii_lowercase();
        let is_all = tag_name == "*";

        self.descendants(scope)
            .filter(|&id| {
                self.get_element(id)
                    .map(|elem| is_all || elem.tag_name.as_str() == tag_lower)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Find elements by tag name.
    pub fn find_elements_by_tag_name(&self, tag_name: &str) -> Vec<NodeId> {
        self.find_elements_by_tag_name_within(self.root, tag_name)
    }

    /// Query selector (basic implementation).
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all_within(self.root, selector)
            .into_iter()
            .next()
    }

    /// Query selector all (basic implementation).
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_selector_all_within(self.root, selector)
    }

    /// Query descendants of `scope` with a simple selector: `tag`, `#id`,
    /// `.class`, `tag.class`, `[attr]` or `[attr=value]`.
    pub fn query_selector_all_within(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let selector = selector.trim();

        if let Some(id) = selector.strip_prefix('#') {
            self.find_element_by_id(id)
                .filter(|&node| node != scope && self.is_inclusive_descendant(node, scope))
                .into_iter()
                .collect()
        } else if let Some(class) = selector.strip_prefix('.') {
            self.descendants(scope)
                .filter(|&id| self.get_element(id).map(|e| e.has_class(class)).unwrap_or(false))
                .collect()
        } else if selector.starts_with('[') && selector.ends_with(']') {
            let attr = &selector[1..selector.len() - 1];
            self.find_elements_by_attribute_within(scope, attr)
        } else if let Some((tag, class)) = selector.split_once('.') {
            self.find_elements_by_tag_name_within(scope, tag)
                .into_iter()
                .filter(|&id| self.get_element(id).map(|e| e.has_class(class)).unwrap_or(false))
                .collect()
        } else {
            self.find_elements_by_tag_name_within(scope, selector)
        }
    }

    /// Find elements by attribute selector body (`name` or `name=value`).
    pub fn find_elements_by_attribute(&self, attr_selector: &str) -> Vec<NodeId> {
        self.find_elements_by_attribute_within(self.root, attr_selector)
    }

    fn find_elements_by_attribute_within(&self, scope: NodeId, attr_selector: &str) -> Vec<NodeId> {
        let (name, value) = match attr_selector.split_once('=') {
            Some((name, value)) => (
                name.trim(),
                Some(value.trim().trim_matches(|c| c == '"' || c == '\'')),
            ),
            None => (attr_selector.trim(), None),
        };

        self.descendants(scope)
            .filter(|&id| match self.get_element(id) {
                Some(elem) => match value {
                    None => elem.has_attribute(name),
                    Some(v) => elem.get_attribute(name) == Some(v),
                },
                None => false,
            })
            .collect()
    }

    /// Set text content of a node, replacing any children of an element.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        let is_element = match self.nodes.get_mut(node) {
            Some(node_data) => match &mut node_data.data {
                NodeData::Text { content } => {
                    *content = text.to_string();
                    false
                }
                NodeData::Element(_) => true,
                _ => false,
            },
            None => false,
        };

        if is_element {
            let children: Vec<NodeId> = self.children(node).collect();
            for child in children {
                self.remove(child);
            }
            if !text.is_empty() {
                let text_node = self.create_text(text.to_string());
                self.append_child(node, text_node);
            }
        }
    }

    /// Get text content of a node and its descendants.
    pub fn get_text_content(&self, node: NodeId) -> String {
        let mut result = String::new();
        self.collect_text_content(node, &mut result);
        result
    }

    fn collect_text_content(&self, node: NodeId, result: &mut String) {
        if let Some(node_data) = self.nodes.get(node) {
            match &node_data.data {
                NodeData::Text { content } => {
                    result.push_str(content);
                }
                NodeData::Element(_) | NodeData::Document => {
                    for &child in &node_data.children {
                        self.collect_text_content(child, result);
                    }
                }
            }
        }
    }

    /// Update ID map after node insertion.
    fn update_id_map(&mut self, node: NodeId) {
        if let Some(id) = self.get_element(node).and_then(|e| e.id.clone()) {
            self.id_map.insert(id.to_string(), node);
        }
    }

    /// Get total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestor nodes.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for AncestorIterator<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.tree.parent(current);
        Some(current)
    }
}

/// Iterator over descendant nodes (pre-order traversal).
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        if let Some(node) = self.tree.nodes.get(current) {
            self.stack.extend(node.children.iter().rev().copied());
        }

        Some(current)
    }
}
