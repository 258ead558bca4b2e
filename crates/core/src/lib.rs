//! Shopfeed Core - Canonical product model and mutation builder.
//!
//! This crate provides the types shared across all Shopfeed components:
//! - `publisher` - Source adapters, inventory resolution, publish orchestration
//! - `cli` - Command-line import tools
//!
//! # Architecture
//!
//! The core crate contains only types and the pure mutation document builder -
//! no I/O, no HTTP clients. A product from any source is first normalized into
//! a [`CanonicalProduct`]; the [`mutation`] module turns a fully materialized
//! product into the `productCreate` document sent to the platform.
//!
//! # Modules
//!
//! - [`types`] - Canonical product, location, and outcome types
//! - [`mutation`] - Escaping-aware `productCreate` document builder

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod mutation;
pub mod types;

pub use mutation::{BuildError, product_create_input, product_create_mutation};
pub use types::*;
