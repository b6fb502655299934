#![forbid(unsafe_code)]

use tc_core::bom::{BomWarning, LineSource, compute_totals, reorder, validate_for_save};
use tc_core::{Component, ComponentId, Product, ProductId};
use tc_storage::{
    CatalogStore, ComponentDraft, ComponentPatch, MemoryBackend, PRODUCTS_COLLECTION,
    ProductDraft, StoreError,
};
use test_log::test;

fn material(
    store: &mut CatalogStore<MemoryBackend>,
    name: &str,
    unit_cost: f64,
    currency: &str,
) -> Component {
    store
        .create_component(ComponentDraft {
            name: name.to_string(),
            unit: "kg".to_string(),
            unit_cost,
            currency: currency.to_string(),
            ..ComponentDraft::default()
        })
        .expect("create component")
}

fn product(store: &mut CatalogStore<MemoryBackend>, name: &str) -> Product {
    store
        .create_product(ProductDraft {
            name: name.to_string(),
            ..ProductDraft::default()
        })
        .expect("create product")
}

fn stored_products_bytes(store: &CatalogStore<MemoryBackend>) -> Option<Vec<u8>> {
    use tc_storage::KvBackend;
    store
        .backend()
        .get(&store.key_for(PRODUCTS_COLLECTION))
        .expect("memory backend read")
}

#[test]
fn single_line_bom_totals() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 10.00, "USD");
    let p = product(&mut store, "P");

    let line = store.new_bom_line(&a.id, 2.0, 50.0).expect("new line");
    store.attach_bom(&p.id, vec![line]).expect("attach");

    let stored = store.get_product_by_id(&p.id).expect("product");
    let totals = compute_totals(stored.bom_items());
    assert_eq!(totals.total_cost, 20.0);
    assert_eq!(totals.total_percentage, 50.0);

    let view = store.bom_view(&p.id).expect("view");
    assert_eq!(view.totals, totals);
    assert_eq!(view.warning, None);
    assert_eq!(view.currencies, vec!["USD".to_string()]);
}

#[test]
fn attach_then_get_round_trips_lines_in_order() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 1.5, "USD");
    let b = material(&mut store, "B", 2.5, "EUR");
    let c = material(&mut store, "C", 0.25, "USD");
    let p = product(&mut store, "P");

    let lines = vec![
        store.new_bom_line(&c.id, 4.0, 10.0).expect("line"),
        store.new_bom_line(&a.id, 1.0, 70.0).expect("line"),
        store.new_bom_line(&b.id, 2.0, 20.0).expect("line"),
    ];
    let returned = store.attach_bom(&p.id, lines.clone()).expect("attach");
    assert_eq!(returned.bom_items(), lines.as_slice());

    let stored = store.get_product_by_id(&p.id).expect("product");
    assert_eq!(stored.bom_items(), lines.as_slice());

    let reordered = reorder(&lines, 0, 2).expect("reorder");
    store.attach_bom(&p.id, reordered.clone()).expect("attach reordered");
    let stored = store.get_product_by_id(&p.id).expect("product");
    assert_eq!(stored.bom_items(), reordered.as_slice());
    assert_eq!(stored.bom_items()[2].component_id, c.id);
}

#[test]
fn attach_is_idempotent() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 3.0, "USD");
    let p = product(&mut store, "P");
    let lines = vec![store.new_bom_line(&a.id, 1.0, 100.0).expect("line")];

    let first = store.attach_bom(&p.id, lines.clone()).expect("first attach");
    let after_first = stored_products_bytes(&store);
    let second = store.attach_bom(&p.id, lines).expect("second attach");
    let after_second = stored_products_bytes(&store);

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
}

#[test]
fn attach_replaces_previous_lines() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 3.0, "USD");
    let b = material(&mut store, "B", 4.0, "USD");
    let p = product(&mut store, "P");

    let old = vec![
        store.new_bom_line(&a.id, 1.0, 40.0).expect("line"),
        store.new_bom_line(&b.id, 1.0, 40.0).expect("line"),
    ];
    store.attach_bom(&p.id, old).expect("attach");

    let new = vec![store.new_bom_line(&b.id, 3.0, 90.0).expect("line")];
    store.attach_bom(&p.id, new.clone()).expect("replace");

    let stored = store.get_product_by_id(&p.id).expect("product");
    assert_eq!(stored.bom_items(), new.as_slice());

    let cleared = store.clear_bom(&p.id).expect("clear");
    assert!(cleared.bom.is_none());
    assert!(store.get_product_by_id(&p.id).expect("product").bom.is_none());
}

#[test]
fn over_one_hundred_percent_warns_but_still_saves() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 10.0, "USD");
    let b = material(&mut store, "B", 5.0, "USD");
    let p = product(&mut store, "P");

    let lines = vec![
        store.new_bom_line(&a.id, 1.0, 60.0).expect("line"),
        store.new_bom_line(&b.id, 1.0, 60.0).expect("line"),
    ];
    assert_eq!(
        validate_for_save(&lines),
        Some(BomWarning::PercentageExceeds { total: 120.0 })
    );

    store.attach_bom(&p.id, lines.clone()).expect("save proceeds");
    let stored = store.get_product_by_id(&p.id).expect("product");
    assert_eq!(stored.bom_items(), lines.as_slice());

    let view = store.bom_view(&p.id).expect("view");
    assert_eq!(view.totals.total_percentage, 120.0);
    assert_eq!(view.totals.total_cost, 15.0);
    assert!(view.warning.is_some());
}

#[test]
fn deleted_component_renders_from_snapshot() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "Organic cotton", 10.0, "USD");
    let b = material(&mut store, "Buttons", 0.5, "EUR");
    let p = product(&mut store, "P");
    let lines = vec![
        store.new_bom_line(&a.id, 2.0, 80.0).expect("line"),
        store.new_bom_line(&b.id, 4.0, 20.0).expect("line"),
    ];
    store.attach_bom(&p.id, lines).expect("attach");

    assert!(store.delete_component(&a.id).expect("delete"));
    assert!(store.get_component_by_id(&a.id).is_none());

    let stored = store.get_product_by_id(&p.id).expect("product");
    assert_eq!(stored.bom_items()[0].component_id, a.id);
    assert_eq!(stored.bom_items()[0].component.name, "Organic cotton");

    let view = store.bom_view(&p.id).expect("view");
    let gone = &view.lines[0];
    assert_eq!(gone.source, LineSource::Snapshot);
    assert_eq!(gone.display.name, "Organic cotton");
    assert_eq!(gone.display.unit_cost, 10.0);
    assert_eq!(gone.display.currency, "USD");
    assert_eq!(view.lines[1].source, LineSource::Live);
    assert_eq!(view.totals.total_cost, 22.0);
    assert!(view.is_mixed_currency());
}

#[test]
fn attach_accepts_lines_for_components_that_no_longer_exist() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 1.0, "USD");
    let p = product(&mut store, "P");
    let line = store.new_bom_line(&a.id, 1.0, 10.0).expect("line");
    store.delete_component(&a.id).expect("delete");

    let saved = store.attach_bom(&p.id, vec![line.clone()]).expect("attach");
    assert_eq!(saved.bom_items(), &[line]);
}

#[test]
fn snapshots_are_frozen_until_refreshed() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 10.0, "USD");
    let gone = material(&mut store, "Gone", 2.0, "USD");
    let p = product(&mut store, "P");
    let lines = vec![
        store.new_bom_line(&a.id, 1.0, 50.0).expect("line"),
        store.new_bom_line(&gone.id, 1.0, 50.0).expect("line"),
    ];
    store.attach_bom(&p.id, lines).expect("attach");
    store.delete_component(&gone.id).expect("delete");

    store
        .update_component(
            &a.id,
            ComponentPatch {
                unit_cost: Some(12.0),
                name: Some("A v2".to_string()),
                ..ComponentPatch::default()
            },
        )
        .expect("update");

    let view = store.bom_view(&p.id).expect("view");
    assert_eq!(view.lines[0].display.name, "A v2");
    assert_eq!(view.lines[0].line.component.unit_cost, 10.0);
    assert_eq!(view.totals.total_cost, 12.0);

    let refreshed = store.refresh_bom_snapshots(&p.id).expect("refresh");
    assert_eq!(refreshed.bom_items()[0].component.unit_cost, 12.0);
    assert_eq!(refreshed.bom_items()[0].component.name, "A v2");
    assert_eq!(refreshed.bom_items()[1].component.name, "Gone");
    assert_eq!(store.bom_view(&p.id).expect("view").totals.total_cost, 14.0);
}

#[test]
fn attach_to_missing_product_is_not_found_and_writes_nothing() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 1.0, "USD");
    let p = product(&mut store, "P");
    let line = store.new_bom_line(&a.id, 1.0, 10.0).expect("line");
    let before = stored_products_bytes(&store);

    let missing = ProductId::try_new("PRD-0404").expect("id");
    let err = store
        .attach_bom(&missing, vec![line])
        .expect_err("product is gone");
    assert!(matches!(
        err,
        StoreError::NotFound { ref id, .. } if id == "PRD-0404"
    ));
    assert_eq!(stored_products_bytes(&store), before);
    assert!(store.get_product_by_id(&p.id).expect("product").bom.is_none());

    assert!(store.bom_view(&missing).expect_err("view").is_not_found());
    assert!(store.clear_bom(&missing).expect_err("clear").is_not_found());
}

#[test]
fn new_bom_line_needs_an_existing_component_and_valid_numbers() {
    let mut store = CatalogStore::in_memory();
    let a = material(&mut store, "A", 1.0, "USD");

    let missing = ComponentId::try_new("CMP-0404").expect("id");
    let err = store.new_bom_line(&missing, 1.0, 10.0).expect_err("unknown");
    assert!(err.is_not_found());

    let err = store.new_bom_line(&a.id, -1.0, 10.0).expect_err("negative");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let first = store.new_bom_line(&a.id, 1.0, 10.0).expect("line");
    let second = store.new_bom_line(&a.id, 1.0, 10.0).expect("line");
    assert_ne!(first.id, second.id);
}

#[test]
fn empty_bom_view_has_zero_totals() {
    let mut store = CatalogStore::in_memory();
    let p = product(&mut store, "P");
    let view = store.bom_view(&p.id).expect("view");
    assert!(view.lines.is_empty());
    assert_eq!(view.totals.total_cost, 0.0);
    assert_eq!(view.totals.total_percentage, 0.0);
    assert_eq!(view.warning, None);
}
