use crate::node::{DomNode, NodeKind, Viewport};
use anyhow::{Error, anyhow, bail};
use indextree::{Arena, NodeId};

/// A headless document: one arena holding the document tree plus any shadow
/// trees attached to its elements. Every mutation that can affect computed
/// styles bumps `cache_epoch` synchronously before returning, so style caches
/// keyed on the epoch invalidate without fine-grained dependency tracking.
#[derive(Debug)]
pub struct Document {
    arena: Arena<DomNode>,
    root: NodeId,
    viewport: Viewport,
    cache_epoch: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        let mut arena = Arena::new();
        Self {
            root: arena.new_node(DomNode::default()),
            arena,
            viewport,
            cache_epoch: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Monotonically increasing generation counter; never reset.
    pub fn cache_epoch(&self) -> u64 {
        self.cache_epoch
    }

    fn bump_epoch(&mut self) {
        self.cache_epoch = self.cache_epoch.wrapping_add(1);
    }

    pub fn document_node(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.arena.get(id).filter(|n| !n.is_removed()).map(|n| n.get())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut DomNode, Error> {
        self.arena
            .get_mut(id)
            .filter(|n| !n.is_removed())
            .map(|n| n.get_mut())
            .ok_or_else(|| anyhow!("unknown node id"))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element { .. }))
    }

    /// Lowercased tag name for element nodes.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(DomNode::tag_name)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(DomNode::element(tag))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DomNode::text(text))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        match self.kind(parent) {
            Some(NodeKind::Document | NodeKind::Element { .. } | NodeKind::ShadowRoot { .. }) => {}
            Some(NodeKind::Text { .. }) => bail!("cannot append children to a text node"),
            None => bail!("unknown parent node"),
        }
        match self.kind(child) {
            Some(NodeKind::Document | NodeKind::ShadowRoot { .. }) => {
                bail!("cannot append a root node")
            }
            Some(_) => {}
            None => bail!("unknown child node"),
        }
        parent.checked_append(child, &mut self.arena)?;
        self.bump_epoch();
        Ok(())
    }

    /// Detach a node (and its subtree) from its parent. The node stays alive
    /// and can be re-appended later; until then it is disconnected.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), Error> {
        if self.node(node).is_none() {
            bail!("unknown node id");
        }
        node.detach(&mut self.arena);
        self.bump_epoch();
        Ok(())
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), Error> {
        let key = name.to_ascii_lowercase();
        let data = self.node_mut(node)?;
        if data.tag_name().is_none() {
            bail!("attributes can only be set on elements");
        }
        if let Some(entry) = data.attrs.iter_mut().find(|(n, _)| *n == key) {
            entry.1 = value.to_string();
        } else {
            data.attrs.push((key, value.to_string()));
        }
        self.bump_epoch();
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), Error> {
        let key = name.to_ascii_lowercase();
        let data = self.node_mut(node)?;
        data.attrs.retain(|(n, _)| *n != key);
        self.bump_epoch();
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        let key = name.to_ascii_lowercase();
        self.node(node)?
            .attrs
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Replace the contents of a text node (e.g. the text of a `<style>`).
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), Error> {
        let data = self.node_mut(node)?;
        match &mut data.kind {
            NodeKind::Text { text: current } => {
                *current = text.to_string();
                self.bump_epoch();
                Ok(())
            }
            _ => bail!("set_text targets a text node"),
        }
    }

    /// Attach already-fetched stylesheet text to a `<link>` element. Fetching
    /// is outside this crate; an unloaded link contributes no rules.
    pub fn set_link_sheet(&mut self, node: NodeId, css_text: &str) -> Result<(), Error> {
        let data = self.node_mut(node)?;
        if data.tag_name() != Some("link") {
            bail!("sheet text can only be attached to <link> elements");
        }
        data.link_sheet = Some(css_text.to_string());
        self.bump_epoch();
        Ok(())
    }

    /// Attach a shadow root to an element. At most one per host.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, Error> {
        let data = self.node_mut(host)?;
        if data.tag_name().is_none() {
            bail!("shadow roots attach to elements");
        }
        if data.shadow_root.is_some() {
            bail!("element already hosts a shadow root");
        }
        let shadow = self.arena.new_node(DomNode {
            kind: NodeKind::ShadowRoot { host },
            ..DomNode::default()
        });
        if let Ok(data) = self.node_mut(host) {
            data.shadow_root = Some(shadow);
        }
        self.bump_epoch();
        Ok(shadow)
    }

    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.node(host)?.shadow_root
    }

    pub fn shadow_host(&self, node: NodeId) -> Option<NodeId> {
        match self.kind(node)? {
            NodeKind::ShadowRoot { host } => Some(*host),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(indextree::Node::parent)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(indextree::Node::previous_sibling)
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(indextree::Node::next_sibling)
    }

    /// The root of the tree `node` currently lives in. Stops at a shadow root
    /// rather than jumping to its host.
    pub fn root_node(&self, node: NodeId) -> NodeId {
        node.ancestors(&self.arena).last().unwrap_or(node)
    }

    /// True when the node reaches this document, following shadow-root → host
    /// links across tree boundaries.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            let root = self.root_node(current);
            if root == self.root {
                return true;
            }
            match self.kind(root) {
                Some(NodeKind::ShadowRoot { host }) => current = *host,
                _ => return false,
            }
        }
    }

    /// The document's root element (`<html>` by convention), if present.
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root).find(|id| self.is_element(*id))
    }

    /// Concatenated text of the node's direct text children.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            if let Some(NodeKind::Text { text }) = self.kind(child) {
                out.push_str(text);
            }
        }
        out
    }

    /// CSS text of every `<style>` and every loaded `<link rel="stylesheet">`
    /// descendant of `scope_root`, in document order. Descendant iteration
    /// never crosses into shadow trees (they are separate roots).
    pub fn style_sheet_texts(&self, scope_root: NodeId) -> Vec<String> {
        let mut sheets = Vec::new();
        for id in scope_root.descendants(&self.arena) {
            let Some(tag) = self.tag_name(id) else {
                continue;
            };
            if tag == "style" {
                let text = self.text_content(id);
                if !text.is_empty() {
                    sheets.push(text);
                }
            } else if tag == "link" && self.is_stylesheet_link(id) {
                if let Some(sheet) = self.node(id).and_then(|n| n.link_sheet.clone()) {
                    sheets.push(sheet);
                }
            }
        }
        sheets
    }

    fn is_stylesheet_link(&self, node: NodeId) -> bool {
        self.attribute(node, "rel")
            .is_some_and(|rel| rel.split_whitespace().any(|p| p.eq_ignore_ascii_case("stylesheet")))
    }
}
