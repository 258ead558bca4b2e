//! Per-location inventory resolution for the manual form.
//!
//! The form carries one quantity field per (location, variant row) pair,
//! keyed `{location_id}_inventory_{row}` where rows count from 1. Only
//! locations the operator actually filled in produce an entry - absent
//! fields are skipped, never zero-filled.

use shopfeed_core::{Location, LocationQuantity};

use crate::error::PublishError;
use crate::form::FormInput;

/// Resolve the quantities the operator assigned to a variant.
///
/// Iterates locations in directory order, emitting a [`LocationQuantity`]
/// for each location that has a form field for this variant index. The
/// emitted `location_id` is the location's platform global id.
///
/// # Errors
///
/// Returns [`PublishError::Validation`] when a submitted quantity does not
/// parse as a whole number.
pub fn resolve(
    variant_index: usize,
    form: &FormInput,
    locations: &[Location],
) -> Result<Vec<LocationQuantity>, PublishError> {
    let mut quantities = Vec::new();
    for location in locations {
        // Rows count from 1 in the form markup.
        let key = format!("{}_inventory_{}", location.id, variant_index + 1);
        if let Some(raw) = form.scalar(&key) {
            let available_quantity = raw.trim().parse::<i64>().map_err(|_| {
                PublishError::Validation(format!(
                    "inventory quantity for location {:?} on variant {} is not a whole number: {raw:?}",
                    location.name,
                    variant_index + 1
                ))
            })?;
            quantities.push(LocationQuantity {
                available_quantity,
                location_id: location.admin_graphql_api_id.clone(),
            });
        }
    }
    Ok(quantities)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn location(id: &str) -> Location {
        Location {
            id: id.to_string(),
            name: format!("Location {id}"),
            admin_graphql_api_id: format!("gid://shopify/Location/{id}"),
            legacy: false,
        }
    }

    #[test]
    fn test_only_supplied_locations_are_emitted() {
        let locations = vec![location("L1"), location("L2")];
        let mut form = FormInput::new();
        form.set_scalar("L1_inventory_1", "5");

        let quantities = resolve(0, &form, &locations).unwrap();
        assert_eq!(
            quantities,
            vec![LocationQuantity {
                available_quantity: 5,
                location_id: "gid://shopify/Location/L1".to_string(),
            }]
        );
    }

    #[test]
    fn test_row_numbering_counts_from_one() {
        let locations = vec![location("L1")];
        let mut form = FormInput::new();
        form.set_scalar("L1_inventory_2", "7");

        assert!(resolve(0, &form, &locations).unwrap().is_empty());
        let quantities = resolve(1, &form, &locations).unwrap();
        assert_eq!(quantities.first().map(|q| q.available_quantity), Some(7));
    }

    #[test]
    fn test_order_follows_directory_order() {
        let locations = vec![location("L2"), location("L1")];
        let mut form = FormInput::new();
        form.set_scalar("L1_inventory_1", "3");
        form.set_scalar("L2_inventory_1", "4");

        let quantities = resolve(0, &form, &locations).unwrap();
        let ids: Vec<&str> = quantities.iter().map(|q| q.location_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["gid://shopify/Location/L2", "gid://shopify/Location/L1"]
        );
    }

    #[test]
    fn test_malformed_quantity_is_a_validation_error() {
        let locations = vec![location("L1")];
        let mut form = FormInput::new();
        form.set_scalar("L1_inventory_1", "lots");

        let err = resolve(0, &form, &locations).unwrap_err();
        assert!(matches!(err, PublishError::Validation(_)));
    }
}
