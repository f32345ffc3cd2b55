//! DOM (Document Object Model) implementation.
//!
//! This crate provides the document tree the custom select widget is built
//! on: nodes in an arena, element data with attributes, class lists and
//! inline style, focus helpers, event dispatch and HTML serialization.

pub mod attributes;
pub mod document;
pub mod element;
pub mod events;
pub mod node;
pub mod serializer;
pub mod tree;

pub use attributes::{AttributeMap, DataAttributes};
pub use document::Document;
pub use element::{ElementData, ElementFlags, TagName};
pub use events::{
    Event, EventDetail, EventListenerOptions, EventManager, EventPhase, EventType,
};
pub use node::{Node, NodeData, NodeId, NodeType};
pub use serializer::{serialize_document, serialize_inner_html, serialize_node, SerializeOptions};
pub use tree::DomTree;
