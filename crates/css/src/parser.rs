//! Declaration-block and stylesheet parsing.
//!
//! The stylesheet parser keeps declaration blocks as raw text; only rule
//! structure (selectors, `@media` nesting) is parsed eagerly. Declarations
//! are streamed through [`parse_declarations`] at resolution time.

use crate::property_manager::PropertyManager;
use crate::selector::parse_selector_list;
use crate::types::{CssRule, Declaration, MediaRule, StyleRule, Stylesheet};
use log::warn;

/// Split a declaration block body into `(name, value, important)` triples.
/// Separators inside parentheses, brackets, or quotes do not split; comments
/// are stripped; a trailing `!important` (any case) sets the flag. Empty
/// names or values are skipped. Property-name case is preserved as authored.
pub fn parse_declarations(css_text: &str, mut emit: impl FnMut(&str, &str, bool)) {
    let text = strip_comments(css_text);
    for segment in split_top_level(&text, ';') {
        let Some(colon) = find_top_level(segment, ':') else {
            continue;
        };
        let name = segment[..colon].trim();
        let raw_value = segment[colon + 1..].trim();
        let (value, important) = split_important(raw_value);
        if name.is_empty() || value.is_empty() {
            continue;
        }
        emit(name, value, important);
    }
}

/// Collect a declaration block into an owned list.
pub fn parse_declaration_list(css_text: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    parse_declarations(css_text, |name, value, important| {
        declarations.push(Declaration {
            name: name.to_string(),
            value: value.to_string(),
            important,
        });
    });
    declarations
}

/// Parse a `style` attribute into a fresh property manager. No cascade, no
/// inheritance filtering, no unit resolution.
pub fn parse_inline_style(css_text: &str) -> PropertyManager {
    let mut manager = PropertyManager::new();
    parse_declarations(css_text, |name, value, important| {
        manager.set(name, value, important);
    });
    manager
}

/// Parse a stylesheet source string into structured rules. `@media` blocks
/// nest; other at-rules are skipped (statements through `;`, blocks through
/// their matching brace). Rules with no parsable selector are dropped.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let text = strip_comments(css);
    Stylesheet {
        rules: parse_rule_list(&text),
    }
}

fn parse_rule_list(text: &str) -> Vec<CssRule> {
    let mut rules = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        if let Some(after_at) = rest.strip_prefix('@') {
            rest = parse_at_rule(after_at, &mut rules);
        } else if let Some(brace) = find_top_level(rest, '{') {
            let selector_text = rest[..brace].trim();
            let (body, after) = read_block(&rest[brace..]);
            let selectors = parse_selector_list(selector_text);
            if selectors.is_empty() {
                warn!("dropping rule with unsupported selector list: {selector_text}");
            } else {
                rules.push(CssRule::Style(StyleRule {
                    selectors,
                    css_text: body.trim().to_string(),
                }));
            }
            rest = after;
        } else {
            break;
        }
        rest = rest.trim_start();
    }
    rules
}

/// `text` starts just after the `@`. Returns the remaining input.
fn parse_at_rule<'a>(text: &'a str, rules: &mut Vec<CssRule>) -> &'a str {
    let keyword_end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(text.len());
    let keyword = &text[..keyword_end];
    let rest = &text[keyword_end..];
    match (find_top_level(rest, '{'), find_top_level(rest, ';')) {
        (Some(brace), semi) if semi.is_none() || semi.is_some_and(|s| brace < s) => {
            let prelude = rest[..brace].trim();
            let (body, after) = read_block(&rest[brace..]);
            if keyword.eq_ignore_ascii_case("media") {
                rules.push(CssRule::Media(MediaRule {
                    condition: prelude.to_string(),
                    rules: parse_rule_list(body),
                }));
            } else {
                warn!("skipping unsupported at-rule @{keyword}");
            }
            after
        }
        (_, Some(semi)) => &rest[semi + 1..],
        _ => "",
    }
}

/// `text` starts with `{`. Returns `(inner, after)`; an unterminated block
/// consumes the rest of the input.
fn read_block(text: &str) -> (&str, &str) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return (&text[1..i], &text[i + 1..]);
                    }
                }
                _ => {}
            },
        }
    }
    (text.get(1..).unwrap_or(""), "")
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
            }
            None if c == '/' && chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for inner in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
                out.push(' ');
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }
    out
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);
    parts
}

fn find_top_level(text: &str, target: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None if c == target && depth == 0 => return Some(i),
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    None
}

fn split_important(value: &str) -> (&str, bool) {
    if let Some(bang) = value.rfind('!') {
        if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (value[..bang].trim_end(), true);
        }
    }
    (value, false)
}
