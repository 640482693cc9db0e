use indextree::NodeId;
use smallvec::SmallVec;

/// Viewport dimensions consulted by media-query evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
    /// An encapsulated subtree root. Kept out of the host's child list so the
    /// ordinary root walk stops here; the host link is followed explicitly.
    ShadowRoot {
        host: NodeId,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub kind: NodeKind,
    /// Lowercased attribute name to value pairs, in first-set order.
    pub(crate) attrs: SmallVec<(String, String), 4>,
    pub(crate) shadow_root: Option<NodeId>,
    /// Already-fetched sheet text for `<link rel="stylesheet">` elements.
    /// `None` means the link is not loaded and contributes no rules.
    pub(crate) link_sheet: Option<String>,
}

impl DomNode {
    pub(crate) fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            ..Self::default()
        }
    }

    pub(crate) fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text {
                text: text.to_string(),
            },
            ..Self::default()
        }
    }

    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }
}
