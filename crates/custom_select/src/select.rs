//! The widget controller.
//!
//! A [`Select`] owns one native element and the synthetic subtree that
//! replaces it on screen:
//!
//! ```text
//! <select data-custom style="display: none">...</select>
//! <div class="custom-select-container" tabindex="0">
//!   <span class="custom-select-value">Apple</span>
//!   <ul class="custom-select-options">
//!     <li class="custom-select-option selected" data-value="apple">Apple</li>
//!     ...
//!   </ul>
//! </div>
//! ```
//!
//! Every selection change updates the option record, the native option's
//! `selected` attribute, the label text and the item's selected class in a
//! single call.

use crate::config::{ClassNames, SelectConfig};
use crate::option::{initial_selection, read_native_options, SelectOption};
use crate::type_ahead::TypeAhead;
use crate::viewport::ListViewport;
use common::{SelectError, SelectResult};
use dom::{Document, NodeId};

/// Visibility of the option list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

/// A custom select widget bound to one native element.
#[derive(Debug)]
pub struct Select {
    pub(crate) native: NodeId,
    pub(crate) options: Vec<SelectOption>,
    pub(crate) container: NodeId,
    pub(crate) label: NodeId,
    pub(crate) list: NodeId,
    pub(crate) visibility: Visibility,
    pub(crate) search: TypeAhead,
    pub(crate) viewport: ListViewport,
    pub(crate) classes: ClassNames,
}

impl Select {
    /// Build the widget for `native`: read its options, create the synthetic
    /// subtree right after it, and hide it.
    ///
    /// Fails without touching the document when `native` is missing, is not
    /// an element, is detached, or has no options.
    pub fn new(document: &mut Document, native: NodeId, config: &SelectConfig) -> SelectResult<Self> {
        if !document.tree.contains(native) {
            return Err(SelectError::NodeNotFound);
        }
        if document.tree.get_element(native).is_none() {
            return Err(SelectError::NotAnElement);
        }
        if document.tree.parent(native).is_none() {
            return Err(SelectError::invalid("element is not attached to a parent"));
        }

        let natives = read_native_options(&document.tree, native);
        let selected = initial_selection(&natives).ok_or(SelectError::NoOptions)?;
        let classes = config.classes.clone();

        let container = document.create_element_with_attributes(
            "div",
            &[("class", classes.container.as_str()), ("tabindex", "0")],
        );
        let label = document.create_element_with_attributes("span", &[("class", classes.label.as_str())]);
        document.tree.set_text_content(label, &natives[selected].label);
        document.tree.append_child(container, label);

        let list = document.create_element_with_attributes("ul", &[("class", classes.list.as_str())]);

        let mut options = Vec::with_capacity(natives.len());
        for (index, mut native_option) in natives.into_iter().enumerate() {
            native_option.selected = index == selected;
            if let Some(elem) = document.tree.get_element_mut(native_option.element) {
                if native_option.selected {
                    elem.set_attribute("selected", "");
                } else {
                    elem.remove_attribute("selected");
                }
            }

            let item = document.create_element_with_attributes("li", &[("class", classes.option.as_str())]);
            if let Some(elem) = document.tree.get_element_mut(item) {
                elem.toggle_class_to(&classes.selected, native_option.selected);
                elem.set_data("value", &native_option.value);
            }
            document.tree.set_text_content(item, &native_option.label);
            document.tree.append_child(list, item);

            options.push(native_option.into_option(item));
        }
        document.tree.append_child(container, list);

        if let Some(elem) = document.tree.get_element_mut(native) {
            elem.set_style_property("display", "none");
        }
        document.tree.insert_after(native, container);

        tracing::debug!(
            options = options.len(),
            selected = %options[selected].value,
            "custom select created"
        );

        Ok(Self {
            native,
            options,
            container,
            label,
            list,
            visibility: Visibility::Closed,
            search: TypeAhead::new(),
            viewport: ListViewport::new(config.visible_options, config.option_height),
            classes,
        })
    }

    /// The native element this widget mirrors.
    pub fn native(&self) -> NodeId {
        self.native
    }

    /// The focusable wrapper element.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The element showing the selected label.
    pub fn label(&self) -> NodeId {
        self.label
    }

    /// The option list element.
    pub fn list(&self) -> NodeId {
        self.list
    }

    /// Option records in document order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The first option with `selected` set.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.selected)
    }

    /// Position of [`Self::selected_option`] in the option list.
    pub fn selected_option_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.selected)
    }

    /// Value of the selected option.
    pub fn value(&self) -> Option<&str> {
        self.selected_option().map(|o| o.value.as_str())
    }

    /// Current search term of the type-ahead.
    pub fn search_term(&self) -> &str {
        self.search.buffer()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// Select the first option whose value equals `value`.
    ///
    /// The previous selection is cleared on its record, native option and
    /// item; the new one is set on all three, the label shows its text, and
    /// the list scrolls it into view.
    pub fn select_value(&mut self, document: &mut Document, value: &str) -> SelectResult<()> {
        let new_index = self
            .options
            .iter()
            .position(|o| o.value == value)
            .ok_or_else(|| SelectError::unknown_value(value))?;

        if let Some(prev_index) = self.selected_option_index() {
            let prev = &mut self.options[prev_index];
            prev.selected = false;
            if let Some(elem) = document.tree.get_element_mut(prev.element) {
                elem.remove_attribute("selected");
            }
            if let Some(elem) = document.tree.get_element_mut(prev.item) {
                elem.remove_class(&self.classes.selected);
            }
        }

        let next = &mut self.options[new_index];
        next.selected = true;
        if let Some(elem) = document.tree.get_element_mut(next.element) {
            elem.set_attribute("selected", "");
        }
        if let Some(elem) = document.tree.get_element_mut(next.item) {
            elem.add_class(&self.classes.selected);
        }
        document.tree.set_text_content(self.label, &next.label);

        self.viewport.reveal(new_index);
        if let Some(elem) = document.tree.get_element_mut(self.list) {
            elem.scroll_top = self.viewport.scroll_top();
        }

        tracing::debug!(value, index = new_index, "option selected");
        Ok(())
    }

    /// Select the option at `index`, if it exists.
    pub fn select_index(&mut self, document: &mut Document, index: usize) -> SelectResult<()> {
        let value = self
            .options
            .get(index)
            .map(|o| o.value.clone())
            .ok_or_else(|| SelectError::invalid(format!("no option at index {}", index)))?;
        self.select_value(document, &value)
    }

    /// Open or close the option list.
    pub fn set_open(&mut self, document: &mut Document, open: bool) {
        let visibility = if open {
            Visibility::Open
        } else {
            Visibility::Closed
        };
        if let Some(elem) = document.tree.get_element_mut(self.list) {
            elem.toggle_class_to(&self.classes.open, open);
        }
        if self.visibility != visibility {
            tracing::debug!(?visibility, "custom select visibility changed");
        }
        self.visibility = visibility;
    }

    /// Flip the option list between open and closed.
    pub fn toggle(&mut self, document: &mut Document) {
        let open = !self.is_open();
        self.set_open(document, open);
    }
}
