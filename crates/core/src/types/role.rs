//! User roles.

use serde::{Deserialize, Serialize};

/// A role held by a signed-in canteen user.
///
/// A user may hold several roles at once; see [`crate::routing`] for how a
/// single display role and landing page are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to all back-office features including user management.
    Admin,
    /// Menu, stock and sales reports.
    Manager,
    /// Point-of-sale counter.
    Cashier,
    /// Kitchen order queue.
    Kitchen,
    /// Self-service ordering.
    Student,
}

impl Role {
    /// Every role, in no particular order.
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::Manager,
        Self::Cashier,
        Self::Kitchen,
        Self::Student,
    ];

    /// Returns the canonical label for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Cashier => "cashier",
            Self::Kitchen => "kitchen",
            Self::Student => "student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| format!("invalid role: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Cashier ".parse::<Role>().unwrap(), Role::Cashier);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("janitor".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Role::Kitchen).unwrap();
        assert_eq!(json, "\"kitchen\"");
    }
}
