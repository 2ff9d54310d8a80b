//! User roles.

use serde::{Deserialize, Serialize};

/// The four account roles of the marketplace.
///
/// The role determines which dashboard a user sees and which operations they
/// may perform: suppliers manage products, customers shop and check out,
/// delivery agents work assigned orders, and admins see everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Supplier,
    Customer,
    DeliveryAgent,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 4] = [
        Self::Admin,
        Self::Supplier,
        Self::Customer,
        Self::DeliveryAgent,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Supplier => write!(f, "supplier"),
            Self::Customer => write!(f, "customer"),
            Self::DeliveryAgent => write!(f, "delivery_agent"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "supplier" => Ok(Self::Supplier),
            "customer" => Ok(Self::Customer),
            "delivery_agent" => Ok(Self::DeliveryAgent),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_from_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::DeliveryAgent).unwrap(),
            "\"delivery_agent\""
        );
        let parsed: Role = serde_json::from_str("\"supplier\"").unwrap();
        assert_eq!(parsed, Role::Supplier);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("driver".parse::<Role>().is_err());
    }
}
