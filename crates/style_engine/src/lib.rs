//! Style resolution: cascade collection across shadow boundaries, specificity
//! ordering, custom-property substitution, font-relative unit normalization,
//! and epoch-based caching of the results.
//!
//! The engine owns nothing of the document; it reads a [`dom::Document`] and
//! keeps per-node caches that stay valid while the document's cache epoch is
//! unchanged (computed styles) or the `style` attribute text is unchanged
//! (inline styles).

use css::property_manager::PropertyManager;
use dom::{Document, NodeId};
use std::collections::HashMap;

mod cache;
mod cascade;
mod resolver;
pub mod tables;

use cache::CacheRecord;

pub struct StyleEngine {
    cache: HashMap<NodeId, CacheRecord>,
    /// Selector-matcher invocations; flat across cache hits.
    selector_match_count: u64,
    /// Full cascade resolutions performed (cache misses).
    cascade_resolve_count: u64,
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleEngine {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            selector_match_count: 0,
            cascade_resolve_count: 0,
        }
    }

    /// Resolved style of a target node: the raw inline `style` attribute
    /// (`computed == false`) or the fully cascaded, unit-normalized computed
    /// style. Never fails; unresolvable input degrades to absent properties.
    pub fn element_style(
        &mut self,
        document: &Document,
        target: NodeId,
        computed: bool,
    ) -> PropertyManager {
        if computed {
            self.computed_style(document, target)
        } else {
            self.inline_style(document, target)
        }
    }

    fn inline_style(&mut self, document: &Document, target: NodeId) -> PropertyManager {
        if !document.is_element(target) {
            return PropertyManager::new();
        }
        let css_text = document.attribute(target, "style").unwrap_or("");
        if let Some(manager) = self.cache.get(&target).and_then(|r| r.valid_inline(css_text)) {
            return manager.clone();
        }
        let manager = css::parser::parse_inline_style(css_text);
        if document.is_connected(target) {
            self.cache
                .entry(target)
                .or_default()
                .store_inline(manager.clone(), css_text.to_string());
        }
        manager
    }

    fn computed_style(&mut self, document: &Document, target: NodeId) -> PropertyManager {
        // Disconnected nodes have no computed style; the cache is neither
        // read nor populated for them.
        if !document.is_connected(target) {
            return PropertyManager::new();
        }
        let epoch = document.cache_epoch();
        if let Some(manager) = self.cache.get(&target).and_then(|r| r.valid_computed(epoch)) {
            return manager.clone();
        }
        tracing::debug!(?target, epoch, "computed-style cache miss, resolving cascade");
        let entries = self.collect(document, target);
        let manager = resolver::resolve_cascade(document, &entries);
        self.cascade_resolve_count += 1;
        self.cache
            .entry(target)
            .or_default()
            .store_computed(manager.clone(), epoch);
        manager
    }

    pub fn perf_selector_match_count(&self) -> u64 {
        self.selector_match_count
    }

    pub fn perf_cascade_resolve_count(&self) -> u64 {
        self.cascade_resolve_count
    }
}
