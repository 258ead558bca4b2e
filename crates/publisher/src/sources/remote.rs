//! Remote source adapters: single product page and store catalog feed.
//!
//! Both adapters fetch the platform's public product JSON with a fixed
//! user agent, decode it through tolerant typed intermediates, and map the
//! result into canonical form. The wire shapes are loosely typed (numbers
//! arrive as strings or numbers, fields go missing), so decoding is split
//! from mapping: serde gets the bytes into an intermediate, the mapping
//! validates what the pipeline actually requires.
//!
//! Known limitations, carried over from the producing system as deliberate
//! cuts: the catalog feed reads page 1 only (up to 250 products), and
//! catalog imports never resolve per-location inventory.

use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use shopfeed_core::{CanonicalProduct, Image, ProductOption, Variant};

use crate::error::PublishError;

/// User agent sent on every remote source fetch.
const USER_AGENT: &str = "MyAgent/1.0";

/// First (and only) catalog page fetched, at the feed's maximum page size.
const CATALOG_QUERY: &str = "products.json?page=1&limit=250";

// =============================================================================
// Wire shapes
// =============================================================================

/// A numeric field that may arrive as a JSON string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Text(String),
    Number(serde_json::Number),
}

impl RawNumber {
    fn into_literal(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductDocument {
    product: Option<RemoteProduct>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Option<Vec<RemoteProduct>>,
}

#[derive(Debug, Deserialize)]
struct RemoteProduct {
    title: Option<String>,
    vendor: Option<String>,
    body_html: Option<String>,
    product_type: Option<String>,
    /// One comma-joined string on this surface, not a list.
    tags: Option<String>,
    #[serde(default)]
    options: Vec<RemoteOption>,
    #[serde(default)]
    variants: Vec<RemoteVariant>,
    #[serde(default)]
    images: Vec<RemoteImage>,
}

#[derive(Debug, Deserialize)]
struct RemoteOption {
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteVariant {
    title: Option<String>,
    sku: Option<String>,
    price: Option<RawNumber>,
    compare_at_price: Option<RawNumber>,
    position: Option<i64>,
    option1: Option<String>,
    option2: Option<String>,
    option3: Option<String>,
    image_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RemoteImage {
    id: Option<i64>,
    src: Option<String>,
}

// =============================================================================
// RemoteSource
// =============================================================================

/// Fetches product data from public storefront JSON endpoints.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
}

impl RemoteSource {
    /// Create a remote source with a bounded per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout: std::time::Duration) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch one product page's JSON and normalize it.
    ///
    /// Requests `{url}.json` and maps the body's `product` object. Variants
    /// are untracked and carry no inventory.
    ///
    /// # Errors
    ///
    /// `Validation` for an unparseable URL, `Http`/`UpstreamStatus` for
    /// network and non-2xx failures, `Decode` for invalid JSON, `Schema`
    /// when the `product` object or a required field is missing.
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, product_url: &str) -> Result<CanonicalProduct, PublishError> {
        let endpoint = product_json_url(product_url)?;
        let document: ProductDocument = self.fetch_json(&endpoint).await?;
        let product = document
            .product
            .ok_or_else(|| PublishError::Schema("response has no `product` object".to_string()))?;
        canonical_from_remote(product)
    }

    /// Fetch the first page of a store's catalog feed and normalize every
    /// listed product.
    ///
    /// Requests `{base}products.json?page=1&limit=250`. Pages beyond the
    /// first are not fetched.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_product`]; `Schema` when the
    /// `products` list is missing.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(
        &self,
        store_url: &str,
    ) -> Result<Vec<CanonicalProduct>, PublishError> {
        let endpoint = catalog_url(store_url)?;
        let document: CatalogDocument = self.fetch_json(&endpoint).await?;
        let products = document
            .products
            .ok_or_else(|| PublishError::Schema("response has no `products` list".to_string()))?;
        debug!(count = products.len(), "catalog page fetched");
        products.into_iter().map(canonical_from_remote).collect()
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, PublishError> {
        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::UpstreamStatus(status.as_u16()));
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// `{url}.json` for a single product page.
fn product_json_url(raw: &str) -> Result<String, PublishError> {
    let parsed = parse_operator_url(raw)?;
    Ok(format!("{}.json", parsed.as_str().trim_end_matches('/')))
}

/// `{base}/products.json?page=1&limit=250` for a store's catalog feed.
fn catalog_url(raw: &str) -> Result<String, PublishError> {
    let parsed = parse_operator_url(raw)?;
    Ok(format!(
        "{}/{CATALOG_QUERY}",
        parsed.as_str().trim_end_matches('/')
    ))
}

fn parse_operator_url(raw: &str) -> Result<Url, PublishError> {
    Url::parse(raw.trim())
        .map_err(|e| PublishError::Validation(format!("not a valid URL: {raw:?} ({e})")))
}

// =============================================================================
// Mapping
// =============================================================================

/// Map a decoded remote product into canonical form.
///
/// Tags arrive as one comma-joined string and are split into individual
/// tags. All source options are re-flattened into a single option entry
/// whose values serialize as one comma-joined scalar - the producing schema
/// expects that shape.
fn canonical_from_remote(remote: RemoteProduct) -> Result<CanonicalProduct, PublishError> {
    let title = remote
        .title
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PublishError::Schema("product is missing `title`".to_string()))?;
    let vendor = remote
        .vendor
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PublishError::Schema("product is missing `vendor`".to_string()))?;

    let mut product = CanonicalProduct::new(title, vendor);
    product.description_html = remote.body_html;
    product.product_type = remote.product_type;
    product.tags = remote.tags.as_deref().map(split_tags).unwrap_or_default();

    let option_values: Vec<String> = remote
        .options
        .into_iter()
        .flat_map(|option| option.values)
        .collect();
    if !option_values.is_empty() {
        product.options = vec![ProductOption {
            values: option_values,
        }];
    }

    product.images = remote
        .images
        .iter()
        .filter_map(|image| image.src.clone().map(|src| Image { src }))
        .collect();

    product.variants = remote
        .variants
        .into_iter()
        .map(|variant| canonical_variant(variant, &remote.images))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(product)
}

fn canonical_variant(
    remote: RemoteVariant,
    images: &[RemoteImage],
) -> Result<Variant, PublishError> {
    let price = remote
        .price
        .map(RawNumber::into_literal)
        .ok_or_else(|| PublishError::Schema("variant is missing `price`".to_string()))?;

    let option_values: Vec<String> = [remote.option1, remote.option2, remote.option3]
        .into_iter()
        .flatten()
        .collect();

    // The feed references the variant's image by id; resolve it to the
    // actual source URL. Unresolvable ids leave the image unset.
    let image_src = remote.image_id.and_then(|image_id| {
        images
            .iter()
            .find(|image| image.id == Some(image_id))
            .and_then(|image| image.src.clone())
    });

    Ok(Variant {
        title: remote.title.unwrap_or_default(),
        sku: remote.sku.unwrap_or_default(),
        price,
        compare_at_price: remote
            .compare_at_price
            .map(RawNumber::into_literal)
            .filter(|value| !value.trim().is_empty()),
        position: remote.position,
        option_values,
        inventory_quantities: Vec::new(),
        image_src,
        tracked: false,
    })
}

/// Split a comma-joined tag string, trimming each tag and dropping blanks
/// and duplicates (first occurrence wins).
fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',') {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|seen| seen == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
