//! HTML serialization.

use crate::document::Document;
use crate::element::ElementData;
use crate::node::{NodeData, NodeId, NodeType};
use crate::tree::DomTree;

/// Options for HTML serialization.
#[derive(Clone, Debug)]
pub struct SerializeOptions {
    /// Pretty print with indentation.
    pub pretty: bool,
    /// Indent string.
    pub indent: String,
    /// Include doctype.
    pub include_doctype: bool,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            include_doctype: true,
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a document to HTML string.
pub fn serialize_document(document: &Document, options: &SerializeOptions) -> String {
    let mut output = String::new();

    if options.include_doctype {
        output.push_str("<!DOCTYPE html>");
        if options.pretty {
            output.push('\n');
        }
    }

    serialize_children(&document.tree, document.tree.root(), &mut output, options, 0);
    output
}

/// Serialize a node and its subtree (outer HTML).
pub fn serialize_node(tree: &DomTree, node: NodeId, options: &SerializeOptions) -> String {
    let mut output = String::new();
    serialize_node_internal(tree, node, &mut output, options, 0);
    output
}

/// Serialize the children of a node (inner HTML).
pub fn serialize_inner_html(tree: &DomTree, node: NodeId) -> String {
    let mut output = String::new();
    serialize_children(tree, node, &mut output, &SerializeOptions::new(), 0);
    output
}

fn serialize_node_internal(
    tree: &DomTree,
    node: NodeId,
    output: &mut String,
    options: &SerializeOptions,
    depth: usize,
) {
    let node_data = match tree.get(node) {
        Some(n) => n,
        None => return,
    };

    match &node_data.data {
        NodeData::Document => {
            serialize_children(tree, node, output, options, depth);
        }
        NodeData::Element(elem) => {
            serialize_element(tree, node, elem, output, options, depth);
        }
        NodeData::Text { content } => {
            output.push_str(&escape_html_text(content));
        }
    }
}

fn serialize_element(
    tree: &DomTree,
    node: NodeId,
    elem: &ElementData,
    output: &mut String,
    options: &SerializeOptions,
    depth: usize,
) {
    let tag_name = elem.tag_name.as_str();

    if options.pretty {
        add_indent(output, options, depth);
    }

    output.push('<');
    output.push_str(tag_name);

    for (name, value) in elem.attributes.iter() {
        output.push(' ');
        output.push_str(name);
        if !value.is_empty() {
            output.push_str("=\"");
            output.push_str(&escape_html_attribute(value));
            output.push('"');
        }
    }

    output.push('>');

    if elem.is_void() {
        if options.pretty {
            output.push('\n');
        }
        return;
    }

    let children = tree.get(node).map(|n| n.children.as_slice()).unwrap_or(&[]);
    let only_text = children.iter().all(|&c| {
        tree.get(c)
            .map(|n| n.node_type == NodeType::Text)
            .unwrap_or(false)
    });

    if !children.is_empty() {
        if options.pretty && !only_text {
            output.push('\n');
        }

        serialize_children(tree, node, output, options, depth + 1);

        if options.pretty && !only_text {
            add_indent(output, options, depth);
        }
    }

    output.push_str("</");
    output.push_str(tag_name);
    output.push('>');

    if options.pretty {
        output.push('\n');
    }
}

fn serialize_children(
    tree: &DomTree,
    node: NodeId,
    output: &mut String,
    options: &SerializeOptions,
    depth: usize,
) {
    if let Some(node_data) = tree.get(node) {
        for &child in &node_data.children {
            serialize_node_internal(tree, child, output, options, depth);
        }
    }
}

fn add_indent(output: &mut String, options: &SerializeOptions, depth: usize) {
    for _ in 0..depth {
        output.push_str(&options.indent);
    }
}

/// Escape HTML text content.
pub fn escape_html_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape HTML attribute value.
pub fn escape_html_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
