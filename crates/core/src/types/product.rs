//! The canonical product model.
//!
//! A [`CanonicalProduct`] is owned exclusively by the pipeline invocation
//! that built it; it is never shared across concurrent requests and needs
//! no synchronization.

use serde::{Deserialize, Serialize};

/// A product normalized from any source, ready for payload building.
///
/// `title` and `vendor` are always present. Every other field is optional
/// and is omitted from the serialized payload when absent - never emitted
/// as null or empty. `description_html` distinguishes "absent" from an
/// empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalProduct {
    /// Product title.
    pub title: String,
    /// Vendor name.
    pub vendor: String,
    /// Product type/category.
    pub product_type: Option<String>,
    /// HTML description. `None` means the source had no description at all.
    pub description_html: Option<String>,
    /// Tags, ordered, deduplicated, without surrounding whitespace.
    pub tags: Vec<String>,
    /// Product options, in source order.
    pub options: Vec<ProductOption>,
    /// Variants, in source order.
    pub variants: Vec<Variant>,
    /// Images, in source order.
    pub images: Vec<Image>,
}

impl CanonicalProduct {
    /// Create a product with only the required fields populated.
    #[must_use]
    pub fn new(title: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            vendor: vendor.into(),
            product_type: None,
            description_html: None,
            tags: Vec::new(),
            options: Vec::new(),
            variants: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// A product option.
///
/// One option entry's values are serialized as a single comma-joined,
/// quoted scalar - the producing schema expects one combined string per
/// option, not a multi-value list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option values, in source order.
    pub values: Vec<String>,
}

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Variant title.
    pub title: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Price literal as supplied by the source. Validated as a non-negative
    /// decimal at build time.
    pub price: String,
    /// Compare-at price literal. Emitted only when present and non-empty.
    pub compare_at_price: Option<String>,
    /// Position within the product, when the source supplies one.
    pub position: Option<i64>,
    /// Option values for this variant, at most three.
    pub option_values: Vec<String>,
    /// Per-location quantities. Only the manual-form path populates these.
    pub inventory_quantities: Vec<LocationQuantity>,
    /// URL of the variant's image, when the source supplies one.
    pub image_src: Option<String>,
    /// Whether the platform should track inventory for this variant.
    /// True only for manual-form input.
    pub tracked: bool,
}

/// An inventory quantity assigned to a fulfillment location.
///
/// Produced only for locations the operator supplied a quantity for;
/// absent entries are never zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuantity {
    /// Units available at the location.
    pub available_quantity: i64,
    /// Platform global id of the location (`gid://shopify/Location/...`).
    pub location_id: String,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image source URL.
    pub src: String,
}
