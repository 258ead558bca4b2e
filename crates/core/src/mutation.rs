//! `productCreate` mutation document builder.
//!
//! The builder assembles an intermediate field tree and serializes it with a
//! single escaping-aware writer, so quoting and optional-field omission are
//! decided in exactly one place. Adapters hand over plain structured values;
//! nothing upstream of this module escapes anything.
//!
//! Field order is fixed: `title`, `published`, `vendor`, `descriptionHtml`,
//! `productType`, `tags`, `options`, `variants`, `images`. Optional fields
//! are omitted entirely when absent - never emitted as null or empty.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{CanonicalProduct, Variant};

/// Errors raised while building a mutation document.
///
/// A build failure aborts the current product's publish before any gateway
/// call is made.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A numeric field did not parse as a decimal literal.
    #[error("{field} is not a valid decimal: {value:?}")]
    InvalidDecimal {
        /// Name of the offending field.
        field: &'static str,
        /// The raw value as supplied by the source.
        value: String,
    },

    /// A price parsed but was negative.
    #[error("{field} must not be negative: {value:?}")]
    NegativeDecimal {
        /// Name of the offending field.
        field: &'static str,
        /// The raw value as supplied by the source.
        value: String,
    },

    /// The HTML description could not be encoded as a JSON string literal.
    #[error("descriptionHtml could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// Field tree
// =============================================================================

/// A value in the mutation-input tree.
enum Value {
    /// Plain string scalar; escaped and quote-wrapped on write.
    Str(String),
    /// Pre-encoded string literal written verbatim (`descriptionHtml`).
    Encoded(String),
    /// Validated numeric literal, written bare.
    Num(String),
    /// Boolean literal.
    Bool(bool),
    /// The literal `null`.
    Null,
    /// Bare enum token such as `DENY`.
    Token(&'static str),
    /// Bracketed list.
    List(Vec<Value>),
    /// Braced object with ordered fields.
    Object(Vec<(&'static str, Value)>),
}

/// Build the `productCreate` input fragment for a product.
///
/// The returned string is the comma-separated field list that goes inside
/// `productCreate (input: { ... })`.
///
/// # Errors
///
/// Returns [`BuildError`] when a numeric field is malformed or a price is
/// negative. Malformed numbers are never embedded literally.
pub fn product_create_input(product: &CanonicalProduct) -> Result<String, BuildError> {
    let fields = input_fields(product)?;
    let mut out = String::new();
    write_fields(&mut out, &fields);
    Ok(out)
}

/// Build the complete mutation document for a product.
///
/// Wraps the input fragment as
/// `mutation { productCreate (input: {...}) { product { id } userErrors { field message } } }`.
///
/// # Errors
///
/// Returns [`BuildError`] when the input fragment fails to build.
pub fn product_create_mutation(product: &CanonicalProduct) -> Result<String, BuildError> {
    let input = product_create_input(product)?;
    Ok(format!(
        "mutation {{ productCreate (input: {{{input}}}) {{ product {{ id }} userErrors {{ field message }} }} }}"
    ))
}

fn input_fields(product: &CanonicalProduct) -> Result<Vec<(&'static str, Value)>, BuildError> {
    let mut fields = vec![
        ("title", Value::Str(product.title.clone())),
        ("published", Value::Bool(true)),
        ("vendor", Value::Str(product.vendor.clone())),
    ];

    if let Some(html) = &product.description_html {
        // JSON string literal: carries embedded quotes/newlines safely and
        // is valid GraphQL string syntax. An empty description is still a
        // description; only a missing one is omitted.
        fields.push(("descriptionHtml", Value::Encoded(serde_json::to_string(html)?)));
    }

    if let Some(product_type) = &product.product_type {
        fields.push(("productType", Value::Str(product_type.clone())));
    }

    let tags: Vec<Value> = product
        .tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| Value::Str(tag.to_string()))
        .collect();
    if !tags.is_empty() {
        fields.push(("tags", Value::List(tags)));
    }

    if !product.options.is_empty() {
        let options = product
            .options
            .iter()
            .map(|option| Value::Str(option.values.join(",")))
            .collect();
        fields.push(("options", Value::List(options)));
    }

    if !product.variants.is_empty() {
        let variants = product
            .variants
            .iter()
            .map(variant_object)
            .collect::<Result<Vec<_>, _>>()?;
        fields.push(("variants", Value::List(variants)));
    }

    if !product.images.is_empty() {
        let images = product
            .images
            .iter()
            .map(|image| Value::Object(vec![("src", Value::Str(image.src.clone()))]))
            .collect();
        fields.push(("images", Value::List(images)));
    }

    Ok(fields)
}

fn variant_object(variant: &Variant) -> Result<Value, BuildError> {
    let price = decimal("price", &variant.price)?;

    let mut fields = vec![
        ("taxable", Value::Bool(false)),
        ("title", Value::Str(variant.title.clone())),
    ];

    if let Some(compare_at) = variant
        .compare_at_price
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        fields.push(("compareAtPrice", Value::Num(well_formed_decimal("compareAtPrice", compare_at)?)));
    }

    fields.push(("sku", Value::Str(variant.sku.clone())));
    fields.push((
        "options",
        Value::List(vec![Value::Str(variant.option_values.join(","))]),
    ));

    if let Some(position) = variant.position {
        fields.push(("position", Value::Num(position.to_string())));
    }

    if let Some(image_src) = &variant.image_src {
        fields.push(("imageSrc", Value::Str(image_src.clone())));
    }

    fields.push((
        "inventoryItem",
        Value::Object(vec![
            ("cost", Value::Num(price.clone())),
            ("tracked", Value::Bool(variant.tracked)),
        ]),
    ));

    if !variant.inventory_quantities.is_empty() {
        let quantities = variant
            .inventory_quantities
            .iter()
            .map(|quantity| {
                Value::Object(vec![
                    ("availableQuantity", Value::Num(quantity.available_quantity.to_string())),
                    ("locationId", Value::Str(quantity.location_id.clone())),
                ])
            })
            .collect();
        fields.push(("inventoryQuantities", Value::List(quantities)));
    }

    fields.push(("inventoryManagement", Value::Null));
    fields.push(("inventoryPolicy", Value::Token("DENY")));
    fields.push(("price", Value::Num(price)));

    Ok(Value::Object(fields))
}

// =============================================================================
// Numeric validation
// =============================================================================

/// Validate a non-negative decimal literal (prices, costs).
fn decimal(field: &'static str, raw: &str) -> Result<String, BuildError> {
    let trimmed = raw.trim();
    let parsed = trimmed.parse::<Decimal>().map_err(|_| BuildError::InvalidDecimal {
        field,
        value: raw.to_string(),
    })?;
    if parsed.is_sign_negative() {
        return Err(BuildError::NegativeDecimal {
            field,
            value: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Validate a decimal literal without a sign constraint.
fn well_formed_decimal(field: &'static str, raw: &str) -> Result<String, BuildError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<Decimal>()
        .map_err(|_| BuildError::InvalidDecimal {
            field,
            value: raw.to_string(),
        })?;
    Ok(trimmed.to_string())
}

// =============================================================================
// Writer
// =============================================================================

fn write_fields(out: &mut String, fields: &[(&'static str, Value)]) {
    for (index, (name, value)) in fields.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str(": ");
        write_value(out, value);
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Str(text) => {
            out.push('"');
            escape_into(out, text);
            out.push('"');
        }
        Value::Encoded(literal) | Value::Num(literal) => out.push_str(literal),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
        Value::Token(token) => out.push_str(token),
        Value::List(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            write_fields(out, fields);
            out.push('}');
        }
    }
}

/// Escape a string scalar for embedding in the mutation document.
///
/// Embedded quotes and backslashes would otherwise terminate the scalar and
/// corrupt the surrounding document; newlines are not legal in a quoted
/// GraphQL string at all.
fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Image, LocationQuantity, ProductOption};

    fn variant(title: &str, sku: &str, price: &str) -> Variant {
        Variant {
            title: title.to_string(),
            sku: sku.to_string(),
            price: price.to_string(),
            compare_at_price: None,
            position: None,
            option_values: vec![title.to_string()],
            inventory_quantities: Vec::new(),
            image_src: None,
            tracked: false,
        }
    }

    /// Walk the document counting `{`/`[` depth, ignoring bracket characters
    /// inside string literals.
    fn assert_balanced(document: &str) {
        let mut brace_depth = 0i64;
        let mut bracket_depth = 0i64;
        let mut in_string = false;
        let mut escaped = false;
        for ch in document.chars() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_string = false;
                }
                continue;
            }
            match ch {
                '"' => in_string = true,
                '{' => brace_depth += 1,
                '}' => brace_depth -= 1,
                '[' => bracket_depth += 1,
                ']' => bracket_depth -= 1,
                _ => {}
            }
            assert!(brace_depth >= 0, "closing brace without opener in {document}");
            assert!(bracket_depth >= 0, "closing bracket without opener in {document}");
        }
        assert!(!in_string, "unterminated string in {document}");
        assert_eq!(brace_depth, 0, "unbalanced braces in {document}");
        assert_eq!(bracket_depth, 0, "unbalanced brackets in {document}");
    }

    #[test]
    fn test_minimal_product_emits_required_fields_only() {
        let product = CanonicalProduct::new("Widget", "Acme");
        let input = product_create_input(&product).unwrap();
        assert_eq!(input, r#"title: "Widget", published: true, vendor: "Acme""#);
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.tags = vec!["   ".to_string()];
        let input = product_create_input(&product).unwrap();
        assert!(!input.contains("tags"));
        assert!(!input.contains("variants"));
        assert!(!input.contains("images"));
        assert_balanced(&product_create_mutation(&product).unwrap());
    }

    #[test]
    fn test_title_quotes_and_backslashes_are_escaped() {
        let product = CanonicalProduct::new(r#"6" Widget \ Pro"#, "Acme");
        let input = product_create_input(&product).unwrap();
        assert!(input.contains(r#"title: "6\" Widget \\ Pro""#));
        assert_balanced(&product_create_mutation(&product).unwrap());
    }

    #[test]
    fn test_description_html_round_trips_quotes_and_newlines() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.description_html = Some("<p class=\"x\">line one\nline two</p>".to_string());
        let document = product_create_mutation(&product).unwrap();
        assert!(document.contains(r#"descriptionHtml: "<p class=\"x\">line one\nline two</p>""#));
        assert_balanced(&document);
    }

    #[test]
    fn test_empty_description_is_still_emitted() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.description_html = Some(String::new());
        let input = product_create_input(&product).unwrap();
        assert!(input.contains(r#"descriptionHtml: """#));
    }

    #[test]
    fn test_tags_are_trimmed_and_quoted() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.tags = vec![" sale ".to_string(), "new".to_string()];
        let input = product_create_input(&product).unwrap();
        assert!(input.contains(r#"tags: ["sale", "new"]"#));
    }

    #[test]
    fn test_option_values_collapse_to_one_scalar() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.options = vec![ProductOption {
            values: vec!["Small".to_string(), "Large".to_string()],
        }];
        let input = product_create_input(&product).unwrap();
        assert!(input.contains(r#"options: ["Small,Large"]"#));
    }

    #[test]
    fn test_variant_carries_fixed_policy_constants() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.variants = vec![variant("Small", "W-S", "12.99")];
        let input = product_create_input(&product).unwrap();
        assert!(input.contains("taxable: false"));
        assert!(input.contains("inventoryManagement: null"));
        assert!(input.contains("inventoryPolicy: DENY"));
        assert!(input.contains("price: 12.99"));
        assert!(input.contains("inventoryItem: {cost: 12.99, tracked: false}"));
        assert!(!input.contains("compareAtPrice"));
        assert!(!input.contains("inventoryQuantities"));
    }

    #[test]
    fn test_variant_inventory_quantities_emitted_when_present() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        let mut tracked = variant("Small", "W-S", "12.99");
        tracked.tracked = true;
        tracked.inventory_quantities = vec![LocationQuantity {
            available_quantity: 5,
            location_id: "gid://shopify/Location/1".to_string(),
        }];
        product.variants = vec![tracked];
        let input = product_create_input(&product).unwrap();
        assert!(input.contains(
            r#"inventoryQuantities: [{availableQuantity: 5, locationId: "gid://shopify/Location/1"}]"#
        ));
        assert!(input.contains("tracked: true"));
    }

    #[test]
    fn test_malformed_price_fails_the_build() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.variants = vec![variant("Small", "W-S", "abc")];
        let err = product_create_mutation(&product).unwrap_err();
        assert!(matches!(err, BuildError::InvalidDecimal { field: "price", .. }));
    }

    #[test]
    fn test_negative_price_fails_the_build() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.variants = vec![variant("Small", "W-S", "-1.00")];
        let err = product_create_mutation(&product).unwrap_err();
        assert!(matches!(err, BuildError::NegativeDecimal { field: "price", .. }));
    }

    #[test]
    fn test_blank_compare_at_price_is_omitted() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        let mut discounted = variant("Small", "W-S", "12.99");
        discounted.compare_at_price = Some("  ".to_string());
        product.variants = vec![discounted];
        let input = product_create_input(&product).unwrap();
        assert!(!input.contains("compareAtPrice"));
    }

    #[test]
    fn test_compare_at_price_emitted_unquoted() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        let mut discounted = variant("Small", "W-S", "12.99");
        discounted.compare_at_price = Some("19.99".to_string());
        product.variants = vec![discounted];
        let input = product_create_input(&product).unwrap();
        assert!(input.contains("compareAtPrice: 19.99,"));
    }

    #[test]
    fn test_full_product_document_is_balanced() {
        let mut product = CanonicalProduct::new("Widget \"Deluxe\"", "Acme & Co");
        product.product_type = Some("Gadgets".to_string());
        product.description_html = Some("<b>\"best\"\nin class</b>".to_string());
        product.tags = vec!["sale".to_string(), "featured".to_string()];
        product.options = vec![ProductOption {
            values: vec!["Small".to_string(), "Large".to_string()],
        }];
        let mut small = variant("Small", "W-S", "12.99");
        small.position = Some(1);
        small.image_src = Some("https://cdn.example.com/small.png".to_string());
        let mut large = variant("Large", "W-L", "15.99");
        large.compare_at_price = Some("19.99".to_string());
        large.position = Some(2);
        product.variants = vec![small, large];
        product.images = vec![Image {
            src: "https://cdn.example.com/widget.png".to_string(),
        }];

        let document = product_create_mutation(&product).unwrap();
        assert_balanced(&document);
        assert!(document.starts_with("mutation { productCreate (input: {"));
        assert!(document.contains("userErrors { field message }"));
        assert!(document.contains("position: 1"));
        assert!(document.contains(r#"imageSrc: "https://cdn.example.com/small.png""#));
        assert!(document.contains(r#"images: [{src: "https://cdn.example.com/widget.png"}]"#));
    }

    #[test]
    fn test_field_order_is_fixed() {
        let mut product = CanonicalProduct::new("Widget", "Acme");
        product.product_type = Some("Gadgets".to_string());
        product.description_html = Some("<p>desc</p>".to_string());
        product.tags = vec!["sale".to_string()];
        let input = product_create_input(&product).unwrap();
        let title_at = input.find("title:").unwrap();
        let published_at = input.find("published:").unwrap();
        let vendor_at = input.find("vendor:").unwrap();
        let description_at = input.find("descriptionHtml:").unwrap();
        let type_at = input.find("productType:").unwrap();
        let tags_at = input.find("tags:").unwrap();
        assert!(title_at < published_at);
        assert!(published_at < vendor_at);
        assert!(vendor_at < description_at);
        assert!(description_at < type_at);
        assert!(type_at < tags_at);
    }
}
