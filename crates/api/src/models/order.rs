//! Order domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use marketdeck_core::{Money, OrderId, OrderStatus, ProductId, UserId};

/// A quantity of one product within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A recorded customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    /// The agent delivering this order, once one is assigned.
    pub delivery_agent_id: Option<UserId>,
    pub total: Money,
    pub status: OrderStatus,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
}

/// Order data exposed by the API, with the customer name joined in.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub customer_id: UserId,
    pub customer_name: String,
    pub delivery_agent_id: Option<UserId>,
    pub total: Money,
    pub status: OrderStatus,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
}

impl OrderView {
    /// Build a view from an order and the resolved customer name.
    #[must_use]
    pub fn new(order: &Order, customer_name: impl Into<String>) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            customer_name: customer_name.into(),
            delivery_agent_id: order.delivery_agent_id,
            total: order.total,
            status: order.status,
            date: order.date,
            items: order.items.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serde_shape() {
        let json = r#"{
            "id": 1,
            "customer_id": 5,
            "delivery_agent_id": 8,
            "total": "1199.98",
            "status": "delivered",
            "date": "2024-12-15",
            "items": [
                {"product_id": 1, "quantity": 1},
                {"product_id": 4, "quantity": 1}
            ]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, "1199.98".parse().unwrap());
    }

    #[test]
    fn test_view_joins_customer_name() {
        let order = Order {
            id: OrderId::new(2),
            customer_id: UserId::new(6),
            delivery_agent_id: None,
            total: "289.98".parse().unwrap(),
            status: OrderStatus::Processing,
            date: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            items: vec![],
        };

        let view = OrderView::new(&order, "Sarah Johnson");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["customer_name"], "Sarah Johnson");
        assert_eq!(json["status"], "processing");
        assert!(json["delivery_agent_id"].is_null());
    }
}
