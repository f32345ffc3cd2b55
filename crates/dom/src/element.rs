//! DOM Element implementation.

use crate::attributes::{data_attribute_name, AttributeMap, DataAttributes};
use bitflags::bitflags;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Common HTML tag names interned for efficiency.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(Arc<str>);

impl TagName {
    pub fn new(name: &str) -> Self {
        static INTERNED: Lazy<RwLock<HashMap<String, Arc<str>>>> =
            Lazy::new(|| RwLock::new(HashMap::new()));

        let lower = name.to_ascii_lowercase();

        {
            let cache = INTERNED.read();
            if let Some(s) = cache.get(&lower) {
                return TagName(s.clone());
            }
        }

        let mut cache = INTERNED.write();
        let s = cache
            .entry(lower.clone())
            .or_insert_with(|| Arc::from(lower.as_str()))
            .clone();
        TagName(s)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn html() -> Self {
        Self::new("html")
    }
    pub fn head() -> Self {
        Self::new("head")
    }
    pub fn body() -> Self {
        Self::new("body")
    }
    pub fn div() -> Self {
        Self::new("div")
    }
    pub fn span() -> Self {
        Self::new("span")
    }
    pub fn ul() -> Self {
        Self::new("ul")
    }
    pub fn li() -> Self {
        Self::new("li")
    }
    pub fn select() -> Self {
        Self::new("select")
    }
    pub fn option() -> Self {
        Self::new("option")
    }
    pub fn optgroup() -> Self {
        Self::new("optgroup")
    }
    pub fn br() -> Self {
        Self::new("br")
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other.to_ascii_lowercase()
    }
}

impl PartialEq<&str> for TagName {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == other.to_ascii_lowercase()
    }
}

bitflags! {
    /// Element flags for quick property checks.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ElementFlags: u32 {
        const VOID = 1 << 0;
        const HIDDEN = 1 << 1;
        const FOCUSABLE = 1 << 2;
        const DISABLED = 1 << 3;
        const SELECTED = 1 << 4;
    }
}

/// Element-specific data.
#[derive(Clone, Debug)]
pub struct ElementData {
    /// Tag name (lowercase).
    pub tag_name: TagName,
    /// Attributes.
    pub attributes: AttributeMap,
    /// ID attribute (cached).
    pub id: Option<Arc<str>>,
    /// Class list (cached).
    pub class_list: SmallVec<[Arc<str>; 4]>,
    /// Element flags.
    pub flags: ElementFlags,
    /// Inline style declarations (cached from the `style` attribute).
    pub style: IndexMap<String, String>,
    /// Vertical scroll offset in pixels.
    pub scroll_top: f32,
}

impl ElementData {
    pub fn new(tag_name: TagName) -> Self {
        let flags = Self::default_flags(&tag_name);
        Self {
            tag_name,
            attributes: AttributeMap::new(),
            id: None,
            class_list: SmallVec::new(),
            flags,
            style: IndexMap::new(),
            scroll_top: 0.0,
        }
    }

    /// Get default flags for a tag.
    fn default_flags(tag_name: &TagName) -> ElementFlags {
        let mut flags = ElementFlags::empty();
        let name = tag_name.as_str();

        if matches!(
            name,
            "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
                | "param" | "source" | "track" | "wbr"
        ) {
            flags |= ElementFlags::VOID;
        }

        if matches!(
            name,
            "a" | "button" | "input" | "select" | "textarea" | "details" | "summary"
        ) {
            flags |= ElementFlags::FOCUSABLE;
        }

        flags
    }

    /// Set an attribute, updating cached values.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name_lower = name.to_ascii_lowercase();

        match name_lower.as_str() {
            "id" => {
                self.id = Some(Arc::from(value));
            }
            "class" => {
                self.class_list = value.split_whitespace().map(Arc::from).collect();
            }
            "style" => {
                self.style = parse_style(value);
            }
            "hidden" => {
                self.flags.insert(ElementFlags::HIDDEN);
            }
            "disabled" => {
                self.flags.insert(ElementFlags::DISABLED);
            }
            "selected" => {
                self.flags.insert(ElementFlags::SELECTED);
            }
            _ => {}
        }

        self.attributes.set(&name_lower, value);
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, name: &str) {
        let name_lower = name.to_ascii_lowercase();

        match name_lower.as_str() {
            "id" => self.id = None,
            "class" => self.class_list.clear(),
            "style" => self.style.clear(),
            "hidden" => self.flags.remove(ElementFlags::HIDDEN),
            "disabled" => self.flags.remove(ElementFlags::DISABLED),
            "selected" => self.flags.remove(ElementFlags::SELECTED),
            _ => {}
        }

        self.attributes.remove(&name_lower);
    }

    #[inline]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase())
    }

    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(&name.to_ascii_lowercase())
    }

    /// `data-*` attributes of this element.
    pub fn dataset(&self) -> DataAttributes<'_> {
        DataAttributes::new(&self.attributes)
    }

    /// Set a `data-*` attribute by its short name.
    pub fn set_data(&mut self, name: &str, value: &str) {
        let full = data_attribute_name(name);
        self.set_attribute(&full, value);
    }

    /// Check if element has a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c.as_ref() == class)
    }

    /// Add a class.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.class_list.push(Arc::from(class));
            self.update_class_attribute();
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, class: &str) {
        if let Some(pos) = self.class_list.iter().position(|c| c.as_ref() == class) {
            self.class_list.remove(pos);
            self.update_class_attribute();
        }
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Add the class when `force` is true, remove it otherwise.
    pub fn toggle_class_to(&mut self, class: &str, force: bool) -> bool {
        if force {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
        force
    }

    fn update_class_attribute(&mut self) {
        let class_str: String = self
            .class_list
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        self.attributes.set("class", &class_str);
    }

    /// Get an inline style property.
    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.style
            .get(&property.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Set an inline style property, rewriting the `style` attribute.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.remove_style_property(property);
            return;
        }
        self.style
            .insert(property.to_ascii_lowercase(), value.to_string());
        self.update_style_attribute();
    }

    /// Remove an inline style property.
    pub fn remove_style_property(&mut self, property: &str) {
        if self.style.shift_remove(&property.to_ascii_lowercase()).is_some() {
            self.update_style_attribute();
        }
    }

    fn update_style_attribute(&mut self) {
        if self.style.is_empty() {
            self.attributes.remove("style");
            return;
        }
        let style_str = self
            .style
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        self.attributes.set("style", &style_str);
    }

    /// Parsed `tabindex` attribute.
    pub fn tab_index(&self) -> Option<i32> {
        self.get_attribute("tabindex")
            .and_then(|v| v.trim().parse().ok())
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.flags.contains(ElementFlags::VOID)
    }

    /// Hidden via the `hidden` attribute or `display: none`.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ElementFlags::HIDDEN) || self.style_property("display") == Some("none")
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.flags.contains(ElementFlags::SELECTED)
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ElementFlags::DISABLED)
    }

    /// Check if this element can receive focus.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        (self.flags.contains(ElementFlags::FOCUSABLE) || self.tab_index().is_some())
            && !self.is_disabled()
    }
}

/// Parse an inline style declaration list.
fn parse_style(value: &str) -> IndexMap<String, String> {
    value
        .split(';')
        .filter_map(|decl| {
            let (name, val) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let val = val.trim();
            if name.is_empty() || val.is_empty() {
                None
            } else {
                Some((name, val.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name() {
        let div = TagName::div();
        assert_eq!(div.as_str(), "div");
        assert!(div == "div");
        assert!(div == "DIV");
    }

    #[test]
    fn test_element_attributes() {
        let mut elem = ElementData::new(TagName::div());
        elem.set_attribute("id", "test");
        elem.set_attribute("class", "foo bar baz");

        assert_eq!(elem.id.as_ref().map(|s| s.as_ref()), Some("test"));
        assert_eq!(elem.class_list.len(), 3);
        assert!(elem.has_class("foo"));
        assert!(elem.has_class("bar"));
        assert!(!elem.has_class("qux"));
    }

    #[test]
    fn test_class_toggling() {
        let mut ul = ElementData::new(TagName::ul());
        ul.add_class("custom-select-options");

        assert!(ul.toggle_class("show"));
        assert_eq!(ul.get_attribute("class"), Some("custom-select-options show"));
        assert!(!ul.toggle_class("show"));
        assert_eq!(ul.get_attribute("class"), Some("custom-select-options"));

        ul.toggle_class_to("show", true);
        ul.toggle_class_to("show", true);
        assert_eq!(ul.class_list.len(), 2);
        ul.toggle_class_to("show", false);
        assert!(!ul.has_class("show"));
    }

    #[test]
    fn test_selected_flag_follows_attribute() {
        let mut option = ElementData::new(TagName::option());
        assert!(!option.is_selected());
        option.set_attribute("selected", "");
        assert!(option.is_selected());
        option.remove_attribute("selected");
        assert!(!option.is_selected());
    }

    #[test]
    fn test_inline_style() {
        let mut select = ElementData::new(TagName::select());
        select.set_attribute("style", "width: 10em; color : red");
        assert_eq!(select.style_property("color"), Some("red"));

        select.set_style_property("display", "none");
        assert!(select.is_hidden());
        assert_eq!(
            select.get_attribute("style"),
            Some("width: 10em; color: red; display: none")
        );

        select.remove_style_property("display");
        assert!(!select.is_hidden());
        select.set_style_property("width", "");
        select.set_style_property("color", "");
        assert!(!select.has_attribute("style"));
    }

    #[test]
    fn test_focusable() {
        let mut div = ElementData::new(TagName::div());
        assert!(!div.is_focusable());
        div.set_attribute("tabindex", "0");
        assert_eq!(div.tab_index(), Some(0));
        assert!(div.is_focusable());

        let mut select = ElementData::new(TagName::select());
        assert!(select.is_focusable());
        select.set_attribute("disabled", "");
        assert!(!select.is_focusable());
    }

    #[test]
    fn test_dataset() {
        let mut li = ElementData::new(TagName::li());
        li.set_data("value", "apple");
        assert_eq!(li.get_attribute("data-value"), Some("apple"));
        assert_eq!(li.dataset().get("value"), Some("apple"));
    }

    #[test]
    fn test_void_elements() {
        let br = ElementData::new(TagName::br());
        let div = ElementData::new(TagName::div());

        assert!(br.is_void());
        assert!(!div.is_void());
    }
}
