//! End-to-end test of the manual-form path.
//!
//! Drives the whole pipeline - form parsing, inventory resolution, mutation
//! building, orchestration - and asserts on the document the gateway
//! actually receives.

use shopfeed_core::{Location, PublishOutcome};
use shopfeed_integration_tests::{CountingResync, ScriptedGateway, accepted_body, test_store};
use shopfeed_publisher::{FormInput, LocationDirectory, Publisher, sources::manual};

fn location(id: &str, name: &str) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        admin_graphql_api_id: format!("gid://shopify/Location/{id}"),
        legacy: false,
    }
}

fn submitted_form() -> FormInput {
    let mut form = FormInput::new();
    form.set_scalar("title", "6\" Widget");
    form.set_scalar("vendor", "Acme");
    form.set_scalar("desc", "<p>The \"best\" widget</p>");
    form.set_scalar("product_type", "Gadgets");
    form.set_scalar("tags", "sale, new");
    form.set_list("variant_title", ["Small", "Large"]);
    form.set_list("sku", ["W-S", "W-L"]);
    form.set_list("variant_price", ["12.99", "15.99"]);
    form.set_list("variant_caprice", ["", "19.99"]);
    form.set_scalar("10_inventory_1", "5");
    form.set_scalar("10_inventory_2", "3");
    form
}

#[tokio::test]
async fn test_manual_form_publishes_with_resolved_inventory() {
    let directory = LocationDirectory::new(
        vec![location("10", "Warehouse"), location("20", "Outlet")],
        "Shopfeed Fulfillment",
    );
    let store = test_store();
    let locations = directory.resolve(&store);

    let product = manual::parse(&submitted_form(), &locations).expect("form should parse");

    let gateway = ScriptedGateway::new();
    gateway.push(200, accepted_body("gid://shopify/Product/7"));
    let resync = CountingResync::new();
    let publisher = Publisher::new(gateway.clone(), resync.clone());

    let outcome = publisher.publish(&store, &product).await.expect("publish");
    assert_eq!(
        outcome,
        PublishOutcome::Created("gid://shopify/Product/7".to_string())
    );
    assert_eq!(resync.count(), 1);

    let requests = gateway.requests();
    let query = requests.first().expect("one request").query();

    // Operator text is escaped, not embedded raw.
    assert!(query.contains(r#"title: "6\" Widget""#));
    assert!(query.contains(r#"descriptionHtml: "<p>The \"best\" widget</p>""#));

    // The variant titles double as the product's single option.
    assert!(query.contains(r#"options: ["Small,Large"]"#));

    // Manual variants are tracked and carry the operator's quantities,
    // addressed by the location's global id.
    assert!(query.contains("tracked: true"));
    assert!(query.contains(
        r#"inventoryQuantities: [{availableQuantity: 5, locationId: "gid://shopify/Location/10"}]"#
    ));
    assert!(query.contains(
        r#"inventoryQuantities: [{availableQuantity: 3, locationId: "gid://shopify/Location/10"}]"#
    ));

    // The compare-at price appears only on the variant that has one.
    assert_eq!(query.matches("compareAtPrice").count(), 1);
    assert!(query.contains("compareAtPrice: 19.99"));
}

#[tokio::test]
async fn test_fulfillment_registered_store_narrows_inventory_locations() {
    let directory = LocationDirectory::new(
        vec![
            location("10", "Warehouse"),
            location("20", "Shopfeed Fulfillment"),
        ],
        "Shopfeed Fulfillment",
    );
    let mut store = test_store();
    store.fulfillment_service_registered = true;
    let locations = directory.resolve(&store);

    let mut form = submitted_form();
    form.set_scalar("20_inventory_1", "8");

    let product = manual::parse(&form, &locations).expect("form should parse");

    // Only the fulfillment location survives; the Warehouse quantities for
    // location 10 are ignored even though the operator submitted them.
    let small = product.variants.first().expect("variant");
    assert_eq!(small.inventory_quantities.len(), 1);
    assert_eq!(
        small
            .inventory_quantities
            .first()
            .map(|quantity| quantity.location_id.as_str()),
        Some("gid://shopify/Location/20")
    );
}

#[tokio::test]
async fn test_misaligned_form_aborts_before_anything_is_built() {
    let mut form = submitted_form();
    form.set_list("sku", ["W-S"]);

    let err = manual::parse(&form, &[]).expect_err("misaligned arrays must fail");
    assert!(err.to_string().contains("misaligned"));
}
