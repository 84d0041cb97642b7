use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque descriptor naming one or more elements on a rendered page.
///
/// Locators are configuration data supplied to the core, never mutated by
/// it. `Css` and `Field` resolve through a plain CSS query; `Text` needs the
/// backend's script path to match on rendered text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// CSS selector.
    Css { selector: String },
    /// Form control addressed by its `name` attribute.
    Field { name: String },
    /// Element whose rendered text matches (or contains) `content`.
    Text { content: String, exact: bool },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        Locator::Field { name: name.into() }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Locator::Text {
            content: content.into(),
            exact: true,
        }
    }

    pub fn text_contains(content: impl Into<String>) -> Self {
        Locator::Text {
            content: content.into(),
            exact: false,
        }
    }

    /// CSS rendering for the selector-resolvable variants.
    pub fn as_css(&self) -> Option<String> {
        match self {
            Locator::Css { selector } => Some(selector.clone()),
            Locator::Field { name } => Some(format!("[name=\"{}\"]", name)),
            Locator::Text { .. } => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css { selector } => write!(f, "css={}", selector),
            Locator::Field { name } => write!(f, "field={}", name),
            Locator::Text { content, exact } => {
                write!(f, "text{}={}", if *exact { "" } else { "~" }, content)
            }
        }
    }
}

/// Backend-issued handle to a located element. Valid until the page the
/// element belongs to navigates or re-renders it away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el#{}", self.0)
    }
}
