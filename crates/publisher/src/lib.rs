//! Shopfeed Publisher - Source adapters, inventory resolution, and publish
//! orchestration.
//!
//! Products enter from three structurally different sources - a manual
//! operator form, a single scraped product page, or a paginated catalog
//! feed - and leave as `productCreate` mutations against the store's Admin
//! GraphQL endpoint. The pipeline is: source adapter ->
//! [`shopfeed_core::CanonicalProduct`] -> (inventory resolver, manual path
//! only) -> mutation builder -> gateway -> outcome.
//!
//! # Modules
//!
//! - [`sources`] - Manual-form and remote-JSON adapters
//! - [`locations`] - Fulfillment location directory
//! - [`inventory`] - Per-location quantity resolution for the manual form
//! - [`gateway`] - Opaque request/response transport to the platform
//! - [`orchestrator`] - Per-product state machine and catalog batching
//! - [`resync`] - Downstream catalog-resync signal
//! - [`store`] - Explicit store-scoped request context
//! - [`config`] - Environment-variable configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use shopfeed_publisher::{HttpGateway, LogResync, Publisher, PublisherConfig, RemoteSource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PublisherConfig::from_env()?;
//! let store = config.store_context();
//!
//! let source = RemoteSource::new(config.http_timeout)?;
//! let product = source
//!     .fetch_product("https://shop.example.com/products/widget")
//!     .await?;
//!
//! let publisher = Publisher::new(HttpGateway::new(config.http_timeout)?, LogResync);
//! let outcome = publisher.publish(&store, &product).await?;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod inventory;
pub mod locations;
pub mod orchestrator;
pub mod resync;
pub mod sources;
pub mod store;

pub use config::{ConfigError, PublisherConfig};
pub use error::PublishError;
pub use form::{FormInput, FormValue};
pub use gateway::{ApiGateway, GatewayResponse, HttpGateway};
pub use locations::LocationDirectory;
pub use orchestrator::{CatalogEntry, CatalogReport, Publisher};
pub use resync::{LogResync, NoopResync, ResyncQueue};
pub use sources::RemoteSource;
pub use store::StoreContext;
