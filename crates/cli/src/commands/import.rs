//! Product and catalog import commands.
//!
//! # Usage
//!
//! ```bash
//! # Publish one product scraped from its storefront page
//! shopfeed import product -u https://shop.example.com/products/widget
//!
//! # Publish the first page of a store's catalog feed
//! shopfeed import store -u https://shop.example.com
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFEED_SHOP_DOMAIN` - Target store domain
//! - `SHOPFEED_ACCESS_TOKEN` - Admin API access token

use thiserror::Error;

use shopfeed_publisher::{
    ConfigError, HttpGateway, LogResync, PublishError, Publisher, PublisherConfig, RemoteSource,
};

/// Errors that can occur during an import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source fetch or mutation build failed.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The platform did not accept the product.
    #[error("{0}")]
    NotPublished(String),
}

/// Publish a single product from its storefront URL.
///
/// Fetches `{url}.json`, normalizes it, and publishes it to the configured
/// store.
///
/// # Errors
///
/// Returns [`ImportError`] when configuration, the fetch, or the build
/// fails, or when the platform rejects the product.
pub async fn product(url: &str) -> Result<(), ImportError> {
    let config = PublisherConfig::from_env()?;
    let store = config.store_context();

    tracing::info!("Fetching product from {url}");
    let source = RemoteSource::new(config.http_timeout)?;
    let product = source.fetch_product(url).await?;

    let publisher = Publisher::new(HttpGateway::new(config.http_timeout)?, LogResync);
    let outcome = publisher.publish(&store, &product).await?;

    if outcome.is_created() {
        tracing::info!("{}", outcome.message());
        Ok(())
    } else {
        Err(ImportError::NotPublished(outcome.message()))
    }
}

/// Publish every product on the first page of a store's catalog feed.
///
/// Per-product results are logged individually; the run finishes with an
/// aggregate summary. A single product's failure never stops the rest of
/// the feed.
///
/// # Errors
///
/// Returns [`ImportError`] when configuration or the catalog fetch fails.
pub async fn store(url: &str) -> Result<(), ImportError> {
    let config = PublisherConfig::from_env()?;
    let store = config.store_context();

    tracing::info!("Fetching catalog feed from {url}");
    let source = RemoteSource::new(config.http_timeout)?;
    let products = source.fetch_catalog(url).await?;
    tracing::info!("Found {} products", products.len());

    let publisher = Publisher::new(HttpGateway::new(config.http_timeout)?, LogResync);
    let report = publisher.publish_catalog(&store, products).await;

    for entry in &report.entries {
        match &entry.result {
            Ok(outcome) if outcome.is_created() => {
                tracing::info!("  {}: {}", entry.title, outcome.message());
            }
            Ok(outcome) => tracing::warn!("  {}: {}", entry.title, outcome.message()),
            Err(error) => tracing::warn!("  {}: {error}", entry.title),
        }
    }
    tracing::info!("{}", report.summary());

    Ok(())
}
