//! Cascade collection: walk the ancestor chain of a target element, crossing
//! shadow boundaries, and gather every matching declaration block together
//! with its priority weight.
//!
//! The walk has two flush points: reaching the owning document feeds the
//! document's stylesheets against the document-rooted ancestors and stops;
//! reaching a shadow root feeds that shadow tree's own stylesheets against
//! the shadow-rooted ancestors (with the host as the `:host` target) and
//! continues the walk from the host.

use crate::StyleEngine;
use css::media::{self, MediaEnv};
use css::selector::{self, MatchElement};
use css::types::CssRule;
use css::units::{self, DEFAULT_FONT_SIZE, MeasurementContext};
use dom::{Document, NodeId, NodeKind};
use std::collections::HashMap;

/// One ancestor's contribution to a resolution pass. Transient: built and
/// discarded within a single `collect`/resolve call.
pub(crate) struct CascadeEntry {
    pub(crate) node: NodeId,
    pub(crate) css_texts: Vec<PrioritizedCssText>,
}

#[derive(Clone, Debug)]
pub(crate) struct PrioritizedCssText {
    pub(crate) css_text: String,
    /// Lower weights are applied first, so higher-specificity rules win via
    /// last-write-wins in the property manager.
    pub(crate) priority_weight: u32,
}

/// Adapter giving the selector matcher a view of one document element.
#[derive(Clone, Copy)]
pub(crate) struct DomElement<'a> {
    doc: &'a Document,
    node: NodeId,
}

impl<'a> DomElement<'a> {
    fn wrap(&self, node: NodeId) -> DomElement<'a> {
        DomElement { doc: self.doc, node }
    }
}

impl MatchElement for DomElement<'_> {
    fn tag_matches(&self, tag: &str) -> bool {
        self.doc.tag_name(self.node) == Some(tag)
    }

    fn id_matches(&self, id: &str) -> bool {
        self.doc.attribute(self.node, "id") == Some(id)
    }

    fn has_class(&self, class: &str) -> bool {
        self.doc
            .attribute(self.node, "class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    fn attribute_matches(&self, name: &str, expected: Option<&str>) -> bool {
        match (self.doc.attribute(self.node, name), expected) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        }
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.doc.parent(self.node)?;
        self.doc.is_element(parent).then(|| self.wrap(parent))
    }

    fn previous_sibling_element(&self) -> Option<Self> {
        let mut current = self.doc.previous_sibling(self.node);
        while let Some(node) = current {
            if self.doc.is_element(node) {
                return Some(self.wrap(node));
            }
            current = self.doc.previous_sibling(node);
        }
        None
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let mut current = self.doc.next_sibling(self.node);
        while let Some(node) = current {
            if self.doc.is_element(node) {
                return Some(self.wrap(node));
            }
            current = self.doc.next_sibling(node);
        }
        None
    }

    fn is_root(&self) -> bool {
        self.doc
            .parent(self.node)
            .is_some_and(|parent| matches!(self.doc.kind(parent), Some(NodeKind::Document)))
    }
}

impl StyleEngine {
    /// Gather the full ancestor chain of `target` (outermost first, target
    /// last) with each element's matched declaration blocks. Only called for
    /// connected targets; non-element targets yield a single synthetic entry
    /// with no declarations.
    pub(crate) fn collect(&mut self, doc: &Document, target: NodeId) -> Vec<CascadeEntry> {
        if !doc.is_element(target) {
            return vec![CascadeEntry {
                node: target,
                css_texts: Vec::new(),
            }];
        }

        let mut contributions: HashMap<NodeId, Vec<PrioritizedCssText>> = HashMap::new();
        let mut parent_chain: Vec<NodeId> = Vec::new();
        // Elements of the scope currently being walked. Which scope that is
        // becomes known at the flush point: the document root flushes it as
        // document-rooted, a shadow root as shadow-rooted.
        let mut scope_elements: Vec<NodeId> = Vec::new();
        let target_is_html = doc.tag_name(target) == Some("html");

        let mut current = Some(target);
        while let Some(node) = current {
            match doc.kind(node) {
                Some(NodeKind::Element { .. }) => {
                    scope_elements.insert(0, node);
                    parent_chain.insert(0, node);
                    current = doc.parent(node);
                }
                Some(NodeKind::Document) => {
                    for sheet_text in doc.style_sheet_texts(node) {
                        let sheet = css::parser::parse_stylesheet(&sheet_text);
                        self.feed_rules(
                            doc,
                            &sheet.rules,
                            &scope_elements,
                            None,
                            target_is_html,
                            &mut contributions,
                        );
                    }
                    current = None;
                }
                Some(NodeKind::ShadowRoot { host }) => {
                    let host = *host;
                    for sheet_text in doc.style_sheet_texts(node) {
                        let sheet = css::parser::parse_stylesheet(&sheet_text);
                        self.feed_rules(
                            doc,
                            &sheet.rules,
                            &scope_elements,
                            Some(host),
                            target_is_html,
                            &mut contributions,
                        );
                    }
                    // The next shadow level starts with a fresh element list.
                    scope_elements.clear();
                    current = Some(host);
                }
                Some(NodeKind::Text { .. }) => current = doc.parent(node),
                None => current = None,
            }
        }

        parent_chain
            .into_iter()
            .map(|node| CascadeEntry {
                css_texts: contributions.remove(&node).unwrap_or_default(),
                node,
            })
            .collect()
    }

    fn feed_rules(
        &mut self,
        doc: &Document,
        rules: &[CssRule],
        targets: &[NodeId],
        host_target: Option<NodeId>,
        target_is_html: bool,
        contributions: &mut HashMap<NodeId, Vec<PrioritizedCssText>>,
    ) {
        for rule in rules {
            match rule {
                CssRule::Style(style_rule) => {
                    for sel in &style_rule.selectors {
                        if sel.targets_host() {
                            // Host rules are always lowest-weight: applied
                            // first, overridable by anything else.
                            if let Some(host) = host_target {
                                contributions.entry(host).or_default().push(PrioritizedCssText {
                                    css_text: style_rule.css_text.clone(),
                                    priority_weight: 0,
                                });
                            }
                            continue;
                        }
                        for &candidate in targets {
                            let element = DomElement { doc, node: candidate };
                            self.selector_match_count += 1;
                            if let Some(specificity) = selector::match_selector(&element, sel) {
                                contributions.entry(candidate).or_default().push(
                                    PrioritizedCssText {
                                        css_text: style_rule.css_text.clone(),
                                        priority_weight: specificity.0,
                                    },
                                );
                            }
                        }
                    }
                }
                CssRule::Media(media_rule) => {
                    if self.media_rule_matches(doc, &media_rule.condition, target_is_html) {
                        self.feed_rules(
                            doc,
                            &media_rule.rules,
                            targets,
                            host_target,
                            target_is_html,
                            contributions,
                        );
                    }
                }
            }
        }
    }

    fn media_rule_matches(&mut self, doc: &Document, condition: &str, target_is_html: bool) -> bool {
        // Forcing 16 while resolving the root element itself avoids recursing
        // into the very computed style being built.
        let root_font_size = if target_is_html {
            DEFAULT_FONT_SIZE
        } else {
            self.document_root_font_size(doc)
        };
        let viewport = doc.viewport();
        media::media_matches(
            condition,
            &MediaEnv {
                viewport_width: viewport.width,
                viewport_height: viewport.height,
                root_font_size,
            },
        )
    }

    /// Resolved `font-size` of the document element, in pixels.
    fn document_root_font_size(&mut self, doc: &Document) -> f32 {
        let Some(root) = doc.document_element() else {
            return DEFAULT_FONT_SIZE;
        };
        let style = self.element_style(doc, root, true);
        style
            .get("font-size")
            .and_then(|property| {
                units::to_pixels(&MeasurementContext {
                    value: &property.value,
                    root_font_size: DEFAULT_FONT_SIZE,
                    parent_font_size: DEFAULT_FONT_SIZE,
                    parent_size: Some(DEFAULT_FONT_SIZE),
                })
            })
            .unwrap_or(DEFAULT_FONT_SIZE)
    }
}
