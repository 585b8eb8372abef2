//! Role routing command.
//!
//! # Usage
//!
//! ```bash
//! canteen route student cashier
//! # role: cashier
//! # landing: /pos
//! ```

use canteen_core::routing::{landing_path, primary_role};

/// Resolve the display role and landing path for a set of role labels.
#[must_use]
pub fn resolve(labels: &[String]) -> String {
    let role = primary_role(labels).map_or_else(|| "none".to_string(), |r| r.to_string());
    let landing = landing_path(labels);
    tracing::debug!(?labels, %role, landing, "Resolved landing page");
    format!("role: {role}\nlanding: {landing}\n")
}
