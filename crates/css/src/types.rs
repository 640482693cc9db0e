use crate::selector::ComplexSelector;
use std::fmt;

/// A single declaration as emitted by the declaration parser.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(f, "{}: {} !important", self.name, self.value)
        } else {
            write!(f, "{}: {}", self.name, self.value)
        }
    }
}

/// A style rule: parsed selectors plus the raw declaration-block text.
/// Declarations stay opaque until the resolver streams the block through
/// [`crate::parser::parse_declarations`].
#[derive(Clone, Debug)]
pub struct StyleRule {
    pub selectors: Vec<ComplexSelector>,
    pub css_text: String,
}

#[derive(Clone, Debug)]
pub struct MediaRule {
    pub condition: String,
    pub rules: Vec<CssRule>,
}

#[derive(Clone, Debug)]
pub enum CssRule {
    Style(StyleRule),
    Media(MediaRule),
}

#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}
