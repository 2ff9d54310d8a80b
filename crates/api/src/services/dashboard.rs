//! Role-specific dashboard aggregation.

use serde::Serialize;

use marketdeck_core::{Money, OrderStatus, UserId};

use crate::models::{OrderView, Product, Profile, User, UserView};
use crate::services::orders;
use crate::store::{CategorySales, MonthlyRevenue, Store};

/// Flat fee a delivery agent earns per completed delivery.
pub const DELIVERY_FEE_CENTS: i64 = 15_00;

/// The dashboard payload for the requesting user's role.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DashboardView {
    Admin(AdminDashboard),
    Supplier(SupplierDashboard),
    Customer(CustomerDashboard),
    DeliveryAgent(AgentDashboard),
}

/// Marketplace-wide stats for administrators.
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub total_users: usize,
    pub total_orders: usize,
    /// Latest month of the seeded revenue series.
    pub monthly_revenue: Money,
    pub active_suppliers: usize,
    pub users: Vec<UserView>,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub top_categories: Vec<CategorySales>,
}

/// A supplier's catalog and sales stats.
#[derive(Debug, Serialize)]
pub struct SupplierDashboard {
    pub product_count: usize,
    /// Revenue from recorded, non-cancelled orders containing this
    /// supplier's products.
    pub total_sales: Money,
    pub rating: f64,
    pub products: Vec<Product>,
}

/// A customer's wallet and order history.
#[derive(Debug, Serialize)]
pub struct CustomerDashboard {
    pub wallet_balance: Money,
    pub order_count: u32,
    pub recent_orders: Vec<OrderView>,
}

/// A delivery agent's workload and earnings.
#[derive(Debug, Serialize)]
pub struct AgentDashboard {
    pub deliveries: u32,
    pub rating: f64,
    /// `deliveries ×` the flat per-delivery fee.
    pub earnings: Money,
    pub available: bool,
    pub assigned: Vec<OrderView>,
}

/// Build the dashboard for a user.
#[must_use]
pub fn for_user(store: &Store, user: &User) -> DashboardView {
    match user.profile {
        Profile::Admin {} => DashboardView::Admin(admin_dashboard(store)),
        Profile::Supplier { rating, .. } => {
            DashboardView::Supplier(supplier_dashboard(store, user.id, rating))
        }
        Profile::Customer {
            wallet_balance,
            order_count,
        } => DashboardView::Customer(customer_dashboard(store, user.id, wallet_balance, order_count)),
        Profile::DeliveryAgent {
            rating,
            deliveries,
            available,
        } => DashboardView::DeliveryAgent(agent_dashboard(store, user.id, rating, deliveries, available)),
    }
}

fn admin_dashboard(store: &Store) -> AdminDashboard {
    let analytics = store.analytics();
    let monthly_revenue = analytics
        .monthly_revenue
        .last()
        .map_or(Money::ZERO, |m| m.revenue);

    AdminDashboard {
        total_users: store.users().count(),
        total_orders: store.orders().list().len(),
        monthly_revenue,
        active_suppliers: store.users().count_by_role(marketdeck_core::Role::Supplier),
        users: store.users().list().iter().map(UserView::from).collect(),
        revenue_by_month: analytics.monthly_revenue,
        top_categories: analytics.top_categories,
    }
}

fn supplier_dashboard(store: &Store, supplier_id: UserId, rating: f64) -> SupplierDashboard {
    let products = store.products().for_supplier(supplier_id);

    SupplierDashboard {
        product_count: products.len(),
        total_sales: supplier_sales(store, supplier_id),
        rating,
        products,
    }
}

fn customer_dashboard(
    store: &Store,
    customer_id: UserId,
    wallet_balance: Money,
    order_count: u32,
) -> CustomerDashboard {
    let recent = store.orders().for_customer(customer_id);

    CustomerDashboard {
        wallet_balance,
        order_count,
        recent_orders: orders::views(store, &recent),
    }
}

fn agent_dashboard(
    store: &Store,
    agent_id: UserId,
    rating: f64,
    deliveries: u32,
    available: bool,
) -> AgentDashboard {
    let assigned = store.orders().for_agent(agent_id);

    AgentDashboard {
        deliveries,
        rating,
        earnings: Money::from_cents(DELIVERY_FEE_CENTS) * deliveries,
        available,
        assigned: orders::views(store, &assigned),
    }
}

/// Revenue attributable to a supplier across non-cancelled orders, priced at
/// the current catalog price.
fn supplier_sales(store: &Store, supplier_id: UserId) -> Money {
    let data = store.read();
    data.orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .flat_map(|o| o.items.iter())
        .filter_map(|item| {
            data.product(item.product_id)
                .filter(|p| p.supplier_id == supplier_id)
                .map(|p| p.price * item.quantity)
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::seed;
    use marketdeck_core::Money;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn dashboard_for(store: &Store, user_id: i32) -> DashboardView {
        let user = store.users().get(UserId::new(user_id)).unwrap();
        for_user(store, &user)
    }

    #[test]
    fn test_admin_dashboard_totals() {
        let store = Store::new(seed::demo());
        let DashboardView::Admin(dashboard) = dashboard_for(&store, 1) else {
            panic!("expected admin dashboard");
        };

        assert_eq!(dashboard.total_users, 10);
        assert_eq!(dashboard.total_orders, 4);
        assert_eq!(dashboard.active_suppliers, 3);
        assert_eq!(dashboard.monthly_revenue, money("89000"));
        assert_eq!(dashboard.users.len(), 10);
        assert_eq!(dashboard.revenue_by_month.len(), 12);
    }

    #[test]
    fn test_supplier_dashboard_sales_from_orders() {
        let store = Store::new(seed::demo());
        let DashboardView::Supplier(dashboard) = dashboard_for(&store, 2) else {
            panic!("expected supplier dashboard");
        };

        // TechCorp lists products 1, 2, 4, 6, 8.
        assert_eq!(dashboard.product_count, 5);
        // Order 1: 999.99 + 199.99; order 3: 299.99; order 4: 49.99.
        assert_eq!(dashboard.total_sales, money("1549.96"));
        assert!((dashboard.rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_customer_dashboard() {
        let store = Store::new(seed::demo());
        let DashboardView::Customer(dashboard) = dashboard_for(&store, 5) else {
            panic!("expected customer dashboard");
        };

        assert_eq!(dashboard.wallet_balance, money("1500.00"));
        assert_eq!(dashboard.order_count, 12);
        assert_eq!(dashboard.recent_orders.len(), 2);
    }

    #[test]
    fn test_agent_dashboard_earnings() {
        let store = Store::new(seed::demo());
        let DashboardView::DeliveryAgent(dashboard) = dashboard_for(&store, 8) else {
            panic!("expected agent dashboard");
        };

        assert_eq!(dashboard.deliveries, 145);
        assert_eq!(dashboard.earnings, money("2175.00"));
        assert!(dashboard.available);
        assert_eq!(dashboard.assigned.len(), 2);
    }
}
