//! Integration tests for cart persistence.
//!
//! These tests drive the cart through its public API only and inspect what
//! lands in storage, covering reloads, corrupt stored values, storage
//! failures, and two independent carts sharing one store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use canteen_cart::codec;
use canteen_cart::{CART_STORAGE_KEY, Cart, CartItem, FileStore, KeyValueStore, MemoryStore};
use canteen_core::Price;
use canteen_integration_tests::temp_store_path;

fn item(id: &str, name: &str, price: &str) -> CartItem {
    CartItem::parse(id, name, price).unwrap()
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_file_backed_cart_survives_reload() {
    let path = temp_store_path();
    {
        let mut cart = Cart::load(FileStore::new(&path));
        cart.add_item_with_quantity(item("a", "Rice", "4.5"), 2);
        cart.add_item(
            item("b", "Tea", "1.2")
                .with_image("https://cdn.example/tea.png")
                .with_description("Jasmine"),
        );
        cart.set_quantity("a", 3);
    }

    let cart = Cart::load(FileStore::new(&path));
    let ids: Vec<_> = cart.lines().iter().map(|l| l.id().as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.subtotal(), Price::parse("14.7").unwrap());

    let tea = cart.line("b").unwrap();
    assert_eq!(tea.image(), Some("https://cdn.example/tea.png"));
    assert_eq!(tea.description(), Some("Jasmine"));
}

#[test]
fn test_engine_built_cart_round_trips() {
    let store = MemoryStore::new();
    let mut cart = Cart::load(store.clone());
    for (quantity, price) in (1_u32..).zip(["0.1", "0.2", "19.99", "0", "1000"]) {
        cart.add_item_with_quantity(item(&format!("item-{quantity}"), "Item", price), quantity);
    }
    cart.add_item_with_quantity(item("item-1", "Ignored", "99"), 4.5);
    cart.remove_item("item-4");

    let reloaded = Cart::load(store);
    assert_eq!(reloaded.lines(), cart.lines());
    assert_eq!(reloaded.subtotal(), cart.subtotal());
    assert_eq!(reloaded.item_count(), cart.item_count());
}

#[test]
fn test_bounded_prices_survive_file_reload() {
    let path = temp_store_path();
    let mut cart = Cart::load(FileStore::new(&path));
    for (quantity, price) in (1_u32..).zip(["0.01", "0.29", "999999999.99", "1000000000"]) {
        cart.add_item_with_quantity(item(&format!("p-{quantity}"), "Item", price), quantity);
    }

    let reloaded = Cart::load(FileStore::new(&path));
    assert_eq!(reloaded.lines(), cart.lines());
    assert_eq!(reloaded.subtotal(), cart.subtotal());
}

#[test]
fn test_unbounded_prices_never_reach_the_cart() {
    for price in ["0.12345678901234567891", "79228162514264337593543950335"] {
        assert!(CartItem::parse("a", "Rice", price).is_err(), "{price}");
    }
}

#[test]
fn test_cleared_cart_reloads_empty() {
    let path = temp_store_path();
    let mut cart = Cart::load(FileStore::new(&path));
    cart.add_item(item("a", "Rice", "4.5"));
    cart.clear();

    assert!(Cart::load(FileStore::new(&path)).is_empty());
}

// =============================================================================
// Corrupt Storage Tests
// =============================================================================

#[test]
fn test_scenario_stored_quantity_is_floored() {
    let store = MemoryStore::new().with_entry(
        CART_STORAGE_KEY,
        r#"[{"id":"b","name":"Tea","price":1.2,"quantity":2.9}]"#,
    );
    let cart = Cart::load(store);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].id().as_str(), "b");
    assert_eq!(cart.lines()[0].quantity().get(), 2);
}

#[test]
fn test_corrupt_record_is_dropped_and_rest_loads() {
    let store = MemoryStore::new().with_entry(
        CART_STORAGE_KEY,
        r#"[{"id":"a","name":"Rice","price":4.5,"quantity":1},
            {"name":"No id","price":1,"quantity":1}]"#,
    );
    let cart = Cart::load(store);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].id().as_str(), "a");
}

#[test]
fn test_adversarial_values_load_as_empty() {
    for raw in ["", "null", "42", r#""[]""#, r#"{"lines":[]}"#, "[", "\u{0}"] {
        let store = MemoryStore::new().with_entry(CART_STORAGE_KEY, raw);
        assert!(Cart::load(store).is_empty(), "{raw:?}");
    }
}

#[test]
fn test_duplicate_stored_ids_merge_and_stay_unique() {
    let store = MemoryStore::new().with_entry(
        CART_STORAGE_KEY,
        r#"[{"id":"a","name":"Rice","price":4.5,"quantity":1},
            {"id":"a","name":"Rice","price":4.5,"quantity":2}]"#,
    );
    let mut cart = Cart::load(store.clone());
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line("a").unwrap().quantity().get(), 3);

    // The first write after loading repairs the stored value.
    cart.add_item(item("a", "Rice", "4.5"));
    let stored = codec::decode(&store.get(CART_STORAGE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.lines.len(), 1);
    assert_eq!(stored.merged, 0);
    assert_eq!(stored.lines[0].quantity().get(), 4);
}

#[test]
fn test_corrupt_storage_file_recovers() {
    let path = temp_store_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "this is not a storage document").unwrap();

    let mut cart = Cart::load(FileStore::new(&path));
    assert!(cart.is_empty());

    cart.add_item(item("a", "Rice", "4.5"));
    assert_eq!(Cart::load(FileStore::new(&path)).item_count(), 1);
}

// =============================================================================
// Storage Failure Tests
// =============================================================================

#[test]
fn test_quota_exceeded_keeps_last_good_value() {
    let path = temp_store_path();
    let mut cart = Cart::load(FileStore::new(&path).with_quota(200));
    cart.add_item(item("a", "Rice", "4.5"));

    for i in 0..20 {
        cart.add_item(item(&format!("extra-{i}"), "A long menu item name", "2"));
    }
    assert_eq!(cart.len(), 21);
    assert_eq!(cart.item_count(), 21);

    let reloaded = Cart::load(FileStore::new(&path));
    assert!(reloaded.len() < cart.len());
    assert_eq!(reloaded.lines()[0].id().as_str(), "a");
}

#[test]
fn test_disabled_storage_never_blocks_checkout() {
    let store = MemoryStore::new();
    store.set_disabled(true);

    let mut cart = Cart::load(store.clone());
    cart.add_item_with_quantity(item("a", "Rice", "4.5"), 2);
    assert_eq!(cart.subtotal(), Price::parse("9").unwrap());
    cart.clear();
    assert!(cart.is_empty());

    store.set_disabled(false);
    assert_eq!(store.get(CART_STORAGE_KEY).unwrap(), None);
}

// =============================================================================
// Shared Store Tests
// =============================================================================

#[test]
fn test_two_contexts_last_writer_wins() {
    let store = MemoryStore::new();
    let mut first = Cart::load(store.clone());
    let mut second = Cart::load(store.clone());

    first.add_item(item("a", "Rice", "4.5"));
    second.add_item(item("b", "Tea", "1.2"));

    // Neither context sees the other's change in memory.
    assert!(first.line("b").is_none());
    assert!(second.line("a").is_none());

    // Storage holds whatever was written last.
    let reloaded = Cart::load(store);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.lines()[0].id().as_str(), "b");
}

#[test]
fn test_observer_tracks_every_committed_state() {
    let mut cart = Cart::load(MemoryStore::new());
    let mut rx = cart.subscribe();
    let mut seen = Vec::new();

    cart.add_item(item("a", "Rice", "4.5"));
    seen.push(rx.borrow_and_update().item_count());
    cart.add_item_with_quantity(item("a", "Rice", "4.5"), 2);
    seen.push(rx.borrow_and_update().item_count());
    cart.remove_item("a");
    seen.push(rx.borrow_and_update().item_count());

    assert_eq!(seen, [1, 3, 0]);
}
