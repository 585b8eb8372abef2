//! Role-based landing policy.
//!
//! Given the role labels attached to the current user, pick the role shown in
//! the header and the page the user lands on after signing in. Labels that do
//! not name a known [`Role`] are ignored.

use crate::types::Role;

/// Roles in descending display priority.
pub const ROLE_PRIORITY: [Role; 5] = [
    Role::Admin,
    Role::Manager,
    Role::Cashier,
    Role::Kitchen,
    Role::Student,
];

/// Landing rules, evaluated in order; the first role the user holds wins.
pub const LANDING_RULES: [(Role, &str); 5] = [
    (Role::Admin, "/admin"),
    (Role::Manager, "/admin/reports"),
    (Role::Cashier, "/pos"),
    (Role::Kitchen, "/kitchen"),
    (Role::Student, "/menu"),
];

/// Landing path for users whose labels match no rule.
pub const DEFAULT_LANDING_PATH: &str = "/";

/// Parse role labels, silently skipping unknown ones.
pub fn parse_roles<I, S>(labels: I) -> Vec<Role>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .filter_map(|label| label.as_ref().parse().ok())
        .collect()
}

/// Resolve the single highest-priority role for display purposes.
///
/// ```
/// use canteen_core::{Role, routing::primary_role};
///
/// assert_eq!(primary_role(["student", "cashier"]), Some(Role::Cashier));
/// assert_eq!(primary_role(["guest"]), None);
/// ```
pub fn primary_role<I, S>(labels: I) -> Option<Role>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let held = parse_roles(labels);
    ROLE_PRIORITY.into_iter().find(|role| held.contains(role))
}

/// Resolve the default landing path for a set of role labels.
///
/// ```
/// use canteen_core::routing::landing_path;
///
/// assert_eq!(landing_path(["kitchen"]), "/kitchen");
/// assert_eq!(landing_path(Vec::<String>::new()), "/");
/// ```
pub fn landing_path<I, S>(labels: I) -> &'static str
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let held = parse_roles(labels);
    LANDING_RULES
        .into_iter()
        .find(|(role, _)| held.contains(role))
        .map_or(DEFAULT_LANDING_PATH, |(_, path)| path)
}
