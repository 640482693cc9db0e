//! CSS leaf collaborators for the style engine: declaration and stylesheet
//! parsing, selector matching with specificity, media-query evaluation,
//! measurement-to-pixel conversion, and the ordered property manager.
//!
//! Values are treated as opaque strings throughout; the only value-level
//! interpretation done here is measurement conversion.

pub mod media;
pub mod parser;
pub mod property_manager;
pub mod selector;
pub mod types;
pub mod units;
