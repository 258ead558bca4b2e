//! Manual operator-form adapter.
//!
//! The form submits scalar fields (`title`, `vendor`, `desc`,
//! `product_type`, a comma-separated `tags` string) and parallel arrays
//! indexed by variant row (`variant_title`, `sku`, `variant_price`,
//! `variant_caprice`), plus per-location quantity fields resolved by
//! [`crate::inventory`]. The product gets exactly one option whose values
//! are the variant titles; each variant's sole option value is its own
//! title - options are not independently modeled on this form.

use shopfeed_core::{CanonicalProduct, Location, ProductOption, Variant};

use crate::error::PublishError;
use crate::form::FormInput;
use crate::inventory;

/// Parse the submitted form into a canonical product.
///
/// Variants built here are tracked and carry the operator's per-location
/// quantities.
///
/// # Errors
///
/// Returns [`PublishError::Validation`] when `title` or `vendor` is missing,
/// when the parallel variant arrays have different lengths, or when an
/// inventory quantity is not a whole number.
pub fn parse(form: &FormInput, locations: &[Location]) -> Result<CanonicalProduct, PublishError> {
    let title = form
        .trimmed_scalar("title")
        .ok_or_else(|| PublishError::Validation("title is required".to_string()))?;
    let vendor = form
        .trimmed_scalar("vendor")
        .ok_or_else(|| PublishError::Validation("vendor is required".to_string()))?;

    let mut product = CanonicalProduct::new(title, vendor);
    product.description_html = form.scalar("desc").map(ToString::to_string);
    product.product_type = form.trimmed_scalar("product_type").map(ToString::to_string);
    product.tags = form
        .scalar("tags")
        .map(split_tags)
        .unwrap_or_default();

    if let Some(titles) = form.list("variant_title") {
        let skus = parallel_array(form, "sku", titles.len())?;
        let prices = parallel_array(form, "variant_price", titles.len())?;
        let compare_at_prices = optional_parallel_array(form, "variant_caprice", titles.len())?;

        product.options = vec![ProductOption {
            values: titles.to_vec(),
        }];

        let mut variants = Vec::with_capacity(titles.len());
        for (index, ((variant_title, sku), price)) in
            titles.iter().zip(skus).zip(prices).enumerate()
        {
            let compare_at_price = compare_at_prices
                .and_then(|values| values.get(index))
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(ToString::to_string);

            variants.push(Variant {
                title: variant_title.clone(),
                sku: sku.clone(),
                price: price.clone(),
                compare_at_price,
                position: None,
                option_values: vec![variant_title.clone()],
                inventory_quantities: inventory::resolve(index, form, locations)?,
                image_src: None,
                tracked: true,
            });
        }
        product.variants = variants;
    }

    Ok(product)
}

/// A required parallel array; its length must match the variant-title array.
fn parallel_array<'a>(
    form: &'a FormInput,
    key: &str,
    expected_len: usize,
) -> Result<&'a [String], PublishError> {
    let values = form.list(key).ok_or_else(|| {
        PublishError::Validation(format!("variant array {key:?} is missing"))
    })?;
    if values.len() == expected_len {
        Ok(values)
    } else {
        Err(misaligned(key, expected_len, values.len()))
    }
}

/// An optional parallel array; when present its length must still match.
fn optional_parallel_array<'a>(
    form: &'a FormInput,
    key: &str,
    expected_len: usize,
) -> Result<Option<&'a [String]>, PublishError> {
    match form.list(key) {
        None => Ok(None),
        Some(values) if values.len() == expected_len => Ok(Some(values)),
        Some(values) => Err(misaligned(key, expected_len, values.len())),
    }
}

fn misaligned(key: &str, expected: usize, actual: usize) -> PublishError {
    PublishError::Validation(format!(
        "variant arrays are misaligned: expected {expected} entries in {key:?}, got {actual}"
    ))
}

/// Split a comma-separated tag string, trimming each tag and dropping
/// blanks and duplicates (first occurrence wins).
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
