//! Core types for Shopfeed.
//!
//! The canonical product model is source-agnostic: every adapter (manual
//! form, single remote product, catalog feed) normalizes into these types
//! before any serialization happens.

pub mod location;
pub mod outcome;
pub mod product;

pub use location::Location;
pub use outcome::PublishOutcome;
pub use product::{CanonicalProduct, Image, LocationQuantity, ProductOption, Variant};
