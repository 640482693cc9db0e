//! Static property tables: per-tag default CSS, the inherited-property set,
//! and the list of properties whose values get a final measurement pass.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Condition attached to a tag-default CSS fragment.
#[derive(Clone, Copy, Debug)]
pub enum TagCssCondition {
    /// Always applies.
    Default,
    /// Applies while the element has the named boolean attribute set.
    AttrSet(&'static str),
}

/// Default CSS fragments per tag, in table-definition order. They are applied
/// before any matched rule, so author declarations at any specificity
/// override them. Keep this list in sync with what layout consumers expect.
pub fn tag_default_css(tag: &str) -> &'static [(TagCssCondition, &'static str)] {
    use TagCssCondition::{AttrSet, Default};
    match tag {
        "html" => &[(Default, "display: block")],
        "body" => &[(Default, "display: block; margin: 8px")],
        "div" | "p" | "header" | "main" | "footer" | "section" | "article" | "nav" | "aside"
        | "ul" | "ol" | "li" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre"
        | "form" | "fieldset" | "figure" | "figcaption" | "hr" | "address" | "dl" | "dt"
        | "dd" | "details" => &[(Default, "display: block")],
        "dialog" => &[(Default, "display: none"), (AttrSet("open"), "display: block")],
        "table" => &[(Default, "display: table")],
        "tr" => &[(Default, "display: table-row")],
        "td" | "th" => &[(Default, "display: table-cell")],
        "button" | "input" | "select" | "textarea" => &[(Default, "display: inline-block")],
        "span" | "a" | "b" | "i" | "u" | "strong" | "em" | "code" | "small" | "label" | "sub"
        | "sup" | "abbr" | "cite" | "q" => &[(Default, "display: inline")],
        "style" | "script" | "head" | "title" | "meta" | "link" | "template" | "base" => {
            &[(Default, "display: none")]
        }
        _ => &[],
    }
}

static INHERITED_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "border-collapse",
        "border-spacing",
        "caption-side",
        "color",
        "cursor",
        "direction",
        "empty-cells",
        "font",
        "font-family",
        "font-size",
        "font-style",
        "font-variant",
        "font-weight",
        "letter-spacing",
        "line-height",
        "list-style",
        "list-style-image",
        "list-style-position",
        "list-style-type",
        "orphans",
        "quotes",
        "tab-size",
        "text-align",
        "text-indent",
        "text-transform",
        "visibility",
        "white-space",
        "widows",
        "word-break",
        "word-spacing",
        "word-wrap",
    ]
    .into_iter()
    .collect()
});

/// Property names are ASCII case-insensitive.
pub fn is_inherited(name: &str) -> bool {
    INHERITED_PROPERTIES.contains(name.to_ascii_lowercase().as_str())
}

/// Properties whose resolved values get a final pixel-normalization pass.
pub const MEASUREMENT_PROPERTIES: &[&str] = &[
    "width",
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
    "top",
    "right",
    "bottom",
    "left",
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "outline-width",
    "flex-basis",
    "gap",
    "column-gap",
    "row-gap",
    "text-indent",
    "letter-spacing",
    "word-spacing",
    "font-size",
];
