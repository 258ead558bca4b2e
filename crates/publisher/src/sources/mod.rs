//! Source adapters.
//!
//! Three structurally different inputs feed the pipeline - the manual
//! operator form, a single scraped product page, and a paginated catalog
//! feed. Each adapter normalizes its input into a
//! [`shopfeed_core::CanonicalProduct`] of plain structured values; quoting
//! and escaping happen later, in the payload builder, never here.

pub mod manual;
pub mod remote;

pub use remote::RemoteSource;
