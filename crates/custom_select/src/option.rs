//! Option model: one record per native `option`, in document order.

use dom::{DomTree, NodeId};

/// One selectable choice, paired with its native and synthetic nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
    /// The native `option` element.
    pub element: NodeId,
    /// The synthetic `li` item.
    pub item: NodeId,
}

/// An option as read from the native element, before its item exists.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NativeOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub element: NodeId,
}

impl NativeOption {
    pub fn into_option(self, item: NodeId) -> SelectOption {
        SelectOption {
            value: self.value,
            label: self.label,
            selected: self.selected,
            element: self.element,
            item,
        }
    }
}

/// Read every `option` below `native`.
///
/// `value` falls back to the option text and `label` to the option text when
/// the attributes are missing, with whitespace stripped and collapsed.
pub(crate) fn read_native_options(tree: &DomTree, native: NodeId) -> Vec<NativeOption> {
    tree.find_elements_by_tag_name_within(native, "option")
        .into_iter()
        .filter_map(|element| {
            let data = tree.get_element(element)?;
            let text = strip_and_collapse_whitespace(&tree.get_text_content(element));

            let value = data
                .get_attribute("value")
                .map(str::to_string)
                .unwrap_or_else(|| text.clone());
            let label = data
                .get_attribute("label")
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or(text);

            Some(NativeOption {
                value,
                label,
                selected: data.is_selected(),
                element,
            })
        })
        .collect()
}

/// Index of the option a single select starts on: the last one marked
/// `selected`, otherwise the first.
pub(crate) fn initial_selection(options: &[NativeOption]) -> Option<usize> {
    options
        .iter()
        .rposition(|o| o.selected)
        .or(if options.is_empty() { None } else { Some(0) })
}

/// Strip leading/trailing ASCII whitespace and collapse inner runs to one space.
pub fn strip_and_collapse_whitespace(s: &str) -> String {
    s.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::Document;

    fn native_select(doc: &mut Document, options: &[&[(&str, &str)]], texts: &[&str]) -> NodeId {
        let select = doc.create_element("select");
        doc.append_to_body(select);
        for (attrs, text) in options.iter().zip(texts) {
            let option = doc.create_element_with_attributes("option", attrs);
            doc.tree.set_text_content(option, text);
            doc.tree.append_child(select, option);
        }
        select
    }

    #[test]
    fn test_value_and_label_fallbacks() {
        let mut doc = Document::new();
        let select = native_select(
            &mut doc,
            &[&[("value", "a")], &[], &[("value", "c"), ("label", "Cherry")], &[("label", "")]],
            &["Apple", "  Blue \n berry ", "ignored", "Date"],
        );

        let options = read_native_options(&doc.tree, select);
        let pairs: Vec<_> = options
            .iter()
            .map(|o| (o.value.as_str(), o.label.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("a", "Apple"), ("Blue berry", "Blue berry"), ("c", "Cherry"), ("Date", "Date")]
        );
    }

    #[test]
    fn test_options_inside_optgroup() {
        let mut doc = Document::new();
        let select = native_select(&mut doc, &[&[("value", "1")]], &["One"]);
        let group = doc.create_element("optgroup");
        let nested = doc.create_element_with_attributes("option", &[("value", "2")]);
        doc.tree.append_child(group, nested);
        doc.tree.append_child(select, group);

        let values: Vec<_> = read_native_options(&doc.tree, select)
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn test_initial_selection() {
        let mut doc = Document::new();
        let none = native_select(&mut doc, &[&[], &[]], &["a", "b"]);
        let last_wins = native_select(
            &mut doc,
            &[&[("selected", "")], &[], &[("selected", "")]],
            &["a", "b", "c"],
        );

        assert_eq!(initial_selection(&read_native_options(&doc.tree, none)), Some(0));
        assert_eq!(initial_selection(&read_native_options(&doc.tree, last_wins)), Some(2));
        assert_eq!(initial_selection(&[]), None);
    }

    #[test]
    fn test_strip_and_collapse_whitespace() {
        assert_eq!(strip_and_collapse_whitespace("  a \t b\n"), "a b");
        assert_eq!(strip_and_collapse_whitespace(""), "");
    }
}
