//! Widget configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// CSS class names applied to the synthetic subtree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Focusable wrapper `div`.
    pub container: String,
    /// `span` showing the selected label.
    pub label: String,
    /// `ul` holding the option items.
    pub list: String,
    /// Each `li` option item.
    pub option: String,
    /// Marker on the item of the selected option.
    pub selected: String,
    /// Marker on the list while it is open.
    pub open: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container: "custom-select-container".to_string(),
            label: "custom-select-value".to_string(),
            list: "custom-select-options".to_string(),
            option: "custom-select-option".to_string(),
            selected: "selected".to_string(),
            open: "show".to_string(),
        }
    }
}

/// Custom select configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Attribute marking native elements to enhance.
    pub marker_attribute: String,
    /// Idle time after which the type-ahead buffer is cleared, in milliseconds.
    pub search_debounce_ms: u64,
    /// Number of option rows visible in the open list.
    pub visible_options: usize,
    /// Height of one option row in pixels.
    pub option_height: f32,
    /// Class names of the synthetic subtree.
    pub classes: ClassNames,
}

impl SelectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type-ahead debounce as a duration.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Set the marker attribute.
    pub fn with_marker_attribute(mut self, attribute: &str) -> Self {
        self.marker_attribute = attribute.to_string();
        self
    }

    /// Set the type-ahead debounce.
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce_ms = debounce.as_millis() as u64;
        self
    }

    /// Set the visible list geometry.
    pub fn with_viewport(mut self, visible_options: usize, option_height: f32) -> Self {
        self.visible_options = visible_options;
        self.option_height = option_height;
        self
    }

    /// Set the class names.
    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "data-custom".to_string(),
            search_debounce_ms: 500,
            visible_options: 6,
            option_height: 24.0,
            classes: ClassNames::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectConfig::default();
        assert_eq!(config.marker_attribute, "data-custom");
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.classes.open, "show");
    }

    #[test]
    fn test_config_builder() {
        let config = SelectConfig::new()
            .with_search_debounce(Duration::from_millis(250))
            .with_viewport(3, 20.0)
            .with_marker_attribute("data-fancy");

        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.visible_options, 3);
        assert_eq!(config.option_height, 20.0);
        assert_eq!(config.marker_attribute, "data-fancy");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SelectConfig =
            serde_json::from_str(r#"{"search_debounce_ms": 800, "classes": {"open": "is-open"}}"#)
                .unwrap();
        assert_eq!(config.search_debounce_ms, 800);
        assert_eq!(config.classes.open, "is-open");
        assert_eq!(config.classes.selected, "selected");
        assert_eq!(config.visible_options, 6);
    }
}
