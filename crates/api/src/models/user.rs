//! User domain types.

use serde::{Deserialize, Serialize};

use marketdeck_core::{Email, Money, Role, UserId};

/// A marketplace user.
///
/// The password hash never leaves the store layer; API responses use
/// [`UserView`].
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Role-specific profile data.
    pub profile: Profile,
}

impl User {
    /// The customer's wallet balance, if this user is a customer.
    #[must_use]
    pub const fn wallet_balance(&self) -> Option<Money> {
        match self.profile {
            Profile::Customer { wallet_balance, .. } => Some(wallet_balance),
            _ => None,
        }
    }

    /// Whether this user is a delivery agent currently accepting work.
    #[must_use]
    pub const fn is_available_agent(&self) -> bool {
        matches!(self.profile, Profile::DeliveryAgent { available: true, .. })
    }
}

/// Role-specific profile fields.
///
/// Serialized untagged and flattened into user payloads, so each role's
/// fields appear at the top level of the user object. `Admin` matches any
/// map during deserialization; it must stay the last variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Profile {
    Supplier {
        rating: f64,
        product_count: u32,
    },
    Customer {
        wallet_balance: Money,
        order_count: u32,
    },
    DeliveryAgent {
        rating: f64,
        deliveries: u32,
        available: bool,
    },
    Admin {},
}

/// User data exposed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    #[serde(flatten)]
    pub profile: Profile,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            profile: user.profile.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn customer() -> User {
        User {
            id: UserId::new(5),
            email: Email::parse("customer1@marketdeck.dev").unwrap(),
            password_hash: String::new(),
            name: "John Smith".to_string(),
            role: Role::Customer,
            profile: Profile::Customer {
                wallet_balance: "1500.00".parse().unwrap(),
                order_count: 12,
            },
        }
    }

    #[test]
    fn test_view_flattens_profile_and_omits_hash() {
        let view = UserView::from(&customer());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["role"], "customer");
        assert_eq!(json["wallet_balance"], "1500.00");
        assert_eq!(json["order_count"], 12);
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_profile_deserializes_by_fields() {
        let supplier: Profile =
            serde_json::from_str(r#"{"rating": 4.5, "product_count": 25}"#).unwrap();
        assert!(matches!(supplier, Profile::Supplier { .. }));

        let agent: Profile =
            serde_json::from_str(r#"{"rating": 4.8, "deliveries": 145, "available": true}"#)
                .unwrap();
        assert!(matches!(agent, Profile::DeliveryAgent { .. }));

        let admin: Profile = serde_json::from_str("{}").unwrap();
        assert!(matches!(admin, Profile::Admin {}));
    }

    #[test]
    fn test_wallet_balance_by_role() {
        assert!(customer().wallet_balance().is_some());

        let admin = User {
            role: Role::Admin,
            profile: Profile::Admin {},
            ..customer()
        };
        assert!(admin.wallet_balance().is_none());
    }
}
