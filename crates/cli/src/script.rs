//! Interaction scripts: comma-separated user actions played against a widget.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Script parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Empty step at position {0}")]
    EmptyStep(usize),

    #[error("Unknown step {0:?}")]
    UnknownStep(String),

    #[error("Invalid wait duration {0:?}")]
    InvalidWait(String),
}

/// One user action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Press a named key, identified by its code.
    Key(String),
    /// Type one character.
    Type(char),
    ClickLabel,
    /// Click the item of the option with this value.
    ClickOption(String),
    Blur,
    Wait(Duration),
}

const NAMED_KEYS: &[&str] = &["Space", "ArrowUp", "ArrowDown", "Enter", "Escape"];

impl Step {
    /// The `(key, code)` pair a keyboard step produces.
    pub fn key_event(&self) -> Option<(String, String)> {
        match self {
            Step::Key(code) if code == "Space" => Some((" ".to_string(), code.clone())),
            Step::Key(code) => Some((code.clone(), code.clone())),
            Step::Type(c) => Some((c.to_string(), key_code(*c))),
            _ => None,
        }
    }
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if NAMED_KEYS.contains(&s) {
            return Ok(Step::Key(s.to_string()));
        }
        // Tabbing away moves focus out of the single widget on the page.
        if s == "blur" || s == "Tab" {
            return Ok(Step::Blur);
        }
        if let Some(target) = s.strip_prefix("click:") {
            return Ok(match target {
                "label" => Step::ClickLabel,
                value => Step::ClickOption(value.to_string()),
            });
        }
        if let Some(ms) = s.strip_prefix("wait:") {
            return ms
                .parse::<u64>()
                .map(|ms| Step::Wait(Duration::from_millis(ms)))
                .map_err(|_| ScriptError::InvalidWait(ms.to_string()));
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Step::Type(c)),
            _ => Err(ScriptError::UnknownStep(s.to_string())),
        }
    }
}

/// Parse a comma-separated script. Surrounding whitespace of each step is
/// ignored.
pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    if script.trim().is_empty() {
        return Ok(Vec::new());
    }
    script
        .split(',')
        .enumerate()
        .map(|(i, step)| {
            let step = step.trim();
            if step.is_empty() {
                Err(ScriptError::EmptyStep(i))
            } else {
                step.parse()
            }
        })
        .collect()
}

/// Physical key code for a typed character.
fn key_code(c: char) -> String {
    if c.is_ascii_alphabetic() {
        format!("Key{}", c.to_ascii_uppercase())
    } else if c.is_ascii_digit() {
        format!("Digit{}", c)
    } else {
        "Unidentified".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let steps = parse_script("Space, ArrowDown,a,click:label,click:banana,blur,wait:600").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Key("Space".to_string()),
                Step::Key("ArrowDown".to_string()),
                Step::Type('a'),
                Step::ClickLabel,
                Step::ClickOption("banana".to_string()),
                Step::Blur,
                Step::Wait(Duration::from_millis(600)),
            ]
        );
    }

    #[test]
    fn test_tab_leaves_widget() {
        assert_eq!(parse_script("Tab").unwrap(), vec![Step::Blur]);
        assert_eq!(Step::Blur.key_event(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_script("").unwrap(), vec![]);
        assert_eq!(parse_script("a,,b"), Err(ScriptError::EmptyStep(1)));
        assert_eq!(parse_script("Home"), Err(ScriptError::UnknownStep("Home".to_string())));
        assert_eq!(parse_script("wait:soon"), Err(ScriptError::InvalidWait("soon".to_string())));
    }

    #[test]
    fn test_key_events() {
        assert_eq!(
            Step::Key("Space".to_string()).key_event(),
            Some((" ".to_string(), "Space".to_string()))
        );
        assert_eq!(
            Step::Type('b').key_event(),
            Some(("b".to_string(), "KeyB".to_string()))
        );
        assert_eq!(
            Step::Type('7').key_event(),
            Some(("7".to_string(), "Digit7".to_string()))
        );
        assert_eq!(Step::Blur.key_event(), None);
    }
}
