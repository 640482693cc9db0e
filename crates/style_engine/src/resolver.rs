//! Fold a collected cascade into a single resolved property manager.
//!
//! Per ancestor, declaration blocks are applied lowest priority weight first
//! (ties keep source order), after the tag's default CSS and before the
//! element's own inline `style` attribute. Non-inherited properties only take
//! effect on the target element itself. Custom properties accumulate in a
//! shared, forward-only table. Font sizes are resolved to pixels as the fold
//! progresses because later font-relative lengths depend on them.

use crate::cascade::CascadeEntry;
use crate::tables::{self, TagCssCondition};
use css::parser;
use css::property_manager::PropertyManager;
use css::units::{self, DEFAULT_FONT_SIZE, MeasurementContext};
use dom::Document;
use std::collections::HashMap;

pub(crate) fn resolve_cascade(doc: &Document, entries: &[CascadeEntry]) -> PropertyManager {
    let mut properties = PropertyManager::new();
    let Some(target) = entries.last().map(|entry| entry.node) else {
        return properties;
    };
    let mut css_variables: HashMap<String, String> = HashMap::new();
    let mut root_font_size = DEFAULT_FONT_SIZE;
    let mut parent_font_size = DEFAULT_FONT_SIZE;

    for entry in entries {
        let element_css = build_element_css(doc, entry);
        let is_target = entry.node == target;
        let entry_is_html = doc.tag_name(entry.node) == Some("html");

        parser::parse_declarations(&element_css, |name, value, important| {
            let is_css_variable = name.starts_with("--");
            // Non-inherited properties only take effect on the element they
            // are declared on.
            if !(is_css_variable || is_target || tables::is_inherited(name)) {
                return;
            }
            let css_value = substitute_vars(value, &css_variables);
            if css_value.is_empty() {
                return;
            }
            let applied = properties.set(name, &css_value, important);
            if is_css_variable {
                css_variables.insert(name.to_string(), css_value.clone());
            }

            // Font sizes are resolved eagerly: later em/rem/percentage values
            // depend on the running root/parent context.
            if name.eq_ignore_ascii_case("font") || name.eq_ignore_ascii_case("font-size") {
                let stored = if name.eq_ignore_ascii_case("font") {
                    font_shorthand_size(&css_value)
                } else {
                    // The governing entry may be an earlier important write.
                    properties.get(name).map(|p| p.value.clone())
                };
                let resolved = stored.and_then(|size| {
                    units::to_pixels(&MeasurementContext {
                        value: &size,
                        root_font_size,
                        parent_font_size,
                        parent_size: Some(parent_font_size),
                    })
                });
                if let Some(px) = resolved {
                    if entry_is_html {
                        root_font_size = px;
                    } else if !is_target {
                        parent_font_size = px;
                    }
                    // Write the pixel form back so the final unit pass is
                    // idempotent for font-size.
                    if applied && name.eq_ignore_ascii_case("font-size") {
                        properties.replace_value(name, &units::format_px(px));
                    }
                }
            }
        });
    }

    // Final unit pass with the settled font-size context. Percentages resolve
    // for font-size only; other properties keep their raw percentage values.
    for name in tables::MEASUREMENT_PROPERTIES {
        let Some(current) = properties.get(name).map(|p| p.value.clone()) else {
            continue;
        };
        let parent_size = (*name == "font-size").then_some(parent_font_size);
        let resolved = units::resolve_measurements_in_value(&MeasurementContext {
            value: &current,
            root_font_size,
            parent_font_size,
            parent_size,
        });
        if resolved != current {
            properties.replace_value(name, &resolved);
        }
    }

    properties
}

/// Concatenate, in application order: the tag's default CSS, the matched
/// declaration blocks sorted by ascending priority weight, and the element's
/// own inline `style` text (last, so it outranks matched rules).
fn build_element_css(doc: &Document, entry: &CascadeEntry) -> String {
    let mut css = String::new();
    if let Some(tag) = doc.tag_name(entry.node) {
        for (condition, default_css) in tables::tag_default_css(tag) {
            let applies = match condition {
                TagCssCondition::Default => true,
                TagCssCondition::AttrSet(attr) => doc.has_attribute(entry.node, attr),
            };
            if applies {
                push_declarations(&mut css, default_css);
            }
        }
    }
    let mut sorted = entry.css_texts.clone();
    sorted.sort_by_key(|text| text.priority_weight);
    for text in &sorted {
        push_declarations(&mut css, &text.css_text);
    }
    if let Some(inline) = doc.attribute(entry.node, "style") {
        push_declarations(&mut css, inline);
    }
    css
}

fn push_declarations(out: &mut String, css_text: &str) {
    let trimmed = css_text.trim();
    if trimmed.is_empty() {
        return;
    }
    out.push_str(trimmed);
    if !trimmed.ends_with(';') {
        out.push(';');
    }
}

/// Best-effort size component of a `font` shorthand: the first token that
/// starts numerically and carries a unit, with any `/line-height` suffix
/// removed. Bare numbers are weights, never sizes.
fn font_shorthand_size(value: &str) -> Option<String> {
    for token in value.split_whitespace() {
        let size_part = token.split('/').next().unwrap_or(token);
        let starts_numeric = size_part
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+');
        let has_unit =
            size_part.ends_with('%') || size_part.chars().any(|c| c.is_ascii_alphabetic());
        if starts_numeric && has_unit {
            return Some(size_part.to_string());
        }
    }
    None
}

/// Single-pass, forward-only `var(--name)` substitution against the table's
/// state at the time this declaration is processed. Undefined variables
/// collapse to the empty string; the fallback form (`var(--x, ...)`) passes
/// through untouched.
fn substitute_vars(value: &str, variables: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 4..];
        let Some(close) = find_balanced_close(after) else {
            out.push_str(&rest[start..]);
            return out.trim().to_string();
        };
        let inner = after[..close].trim();
        if inner.starts_with("--") && !inner.contains(',') {
            if let Some(substituted) = variables.get(inner) {
                out.push_str(substituted);
            }
        } else {
            out.push_str(&rest[start..start + 4 + close + 1]);
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out.trim().to_string()
}

fn find_balanced_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
