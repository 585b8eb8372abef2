//! Integration tests for role routing.
//!
//! Role labels arrive from the session as free-form strings. These tests
//! check that the display role and landing page agree with each other for
//! realistic label sets.

use canteen_core::Role;
use canteen_core::routing::{DEFAULT_LANDING_PATH, landing_path, primary_role};

// =============================================================================
// Single Role Tests
// =============================================================================

#[test]
fn test_each_role_lands_on_its_own_page() {
    let expected = [
        (Role::Admin, "/admin"),
        (Role::Manager, "/admin/reports"),
        (Role::Cashier, "/pos"),
        (Role::Kitchen, "/kitchen"),
        (Role::Student, "/menu"),
    ];
    for (role, path) in expected {
        let labels = [role.as_str()];
        assert_eq!(primary_role(labels), Some(role));
        assert_eq!(landing_path(labels), path, "{role}");
    }
}

// =============================================================================
// Mixed Role Tests
// =============================================================================

#[test]
fn test_staff_member_who_also_orders() {
    let labels = ["student", "cashier"];
    assert_eq!(primary_role(labels), Some(Role::Cashier));
    assert_eq!(landing_path(labels), "/pos");
}

#[test]
fn test_highest_role_wins_regardless_of_order() {
    let labels = vec!["kitchen".to_string(), "Admin".to_string(), "manager".to_string()];
    assert_eq!(primary_role(&labels), Some(Role::Admin));
    assert_eq!(landing_path(&labels), "/admin");
}

#[test]
fn test_unknown_labels_are_ignored() {
    let labels = ["guest", " Kitchen ", "superuser"];
    assert_eq!(primary_role(labels), Some(Role::Kitchen));
    assert_eq!(landing_path(labels), "/kitchen");
}

// =============================================================================
// Fallback Tests
// =============================================================================

#[test]
fn test_no_roles_falls_back_to_default() {
    let labels: [&str; 0] = [];
    assert_eq!(primary_role(labels), None);
    assert_eq!(landing_path(labels), DEFAULT_LANDING_PATH);
}

#[test]
fn test_only_unknown_roles_falls_back_to_default() {
    let labels = ["guest", ""];
    assert_eq!(primary_role(labels), None);
    assert_eq!(landing_path(labels), DEFAULT_LANDING_PATH);
}
