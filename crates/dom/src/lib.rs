//! Arena-backed document tree: elements, text, shadow roots, attributes and
//! stylesheet carriers, plus the per-document cache epoch used by style
//! resolution to invalidate computed-style caches.

mod document;
mod node;

pub use document::Document;
pub use indextree::NodeId;
pub use node::{DomNode, NodeKind, Viewport};
