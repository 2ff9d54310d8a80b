//! Cart and checkout flow tests.

use axum::http::StatusCode;
use marketdeck_integration_tests::{TestApp, demo};
use serde_json::json;

#[tokio::test]
async fn cart_is_customer_only() {
    let mut app = TestApp::new();
    app.login_as(demo::SUPPLIER1).await;

    let (status, body) = app.get("/api/cart").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Only customers have a cart");
}

#[tokio::test]
async fn cart_starts_empty() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    let (status, body) = app.get("/api/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["total"], "0");
    assert_eq!(body["item_count"], 0);
}

#[tokio::test]
async fn total_is_sum_of_price_times_quantity() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    app.post("/api/cart/items", json!({"product_id": 1})).await;
    // Same product again merges into one line.
    app.post("/api/cart/items", json!({"product_id": 1})).await;
    let (status, body) = app
        .post("/api/cart/items", json!({"product_id": 5, "quantity": 1}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    // 2 × 999.99 + 1 × 89.99
    assert_eq!(body["items"][0]["line_total"], "1999.98");
    assert_eq!(body["total"], "2089.97");
    assert_eq!(body["item_count"], 3);

    let (_, count) = app.get("/api/cart/count").await;
    assert_eq!(count["count"], 3);
}

#[tokio::test]
async fn quantity_zero_removes_the_line() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    app.post("/api/cart/items", json!({"product_id": 3, "quantity": 2}))
        .await;
    let (status, body) = app
        .patch("/api/cart/items/3", json!({"quantity": 0}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn updating_a_missing_line_is_not_found() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    let (status, _) = app.patch("/api/cart/items/7", json!({"quantity": 2})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_a_line() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    app.post("/api/cart/items", json!({"product_id": 10})).await;
    let (status, body) = app.delete("/api/cart/items/10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_count"], 0);
}

#[tokio::test]
async fn out_of_stock_products_cannot_be_added() {
    let mut app = TestApp::new();
    // Supplier empties their own stock first.
    app.login_as(demo::SUPPLIER1).await;
    app.put("/api/products/1", json!({"stock": 0})).await;
    app.post_empty("/api/auth/logout").await;

    app.login_as(demo::CUSTOMER1).await;
    let (status, body) = app.post("/api/cart/items", json!({"product_id": 1})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn checkout_with_empty_cart_is_rejected() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    let (status, body) = app.post_empty("/api/checkout").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "cart is empty");
}

#[tokio::test]
async fn checkout_beyond_wallet_balance_is_rejected() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    // 2 × 999.99 against a 1500.00 wallet.
    app.post("/api/cart/items", json!({"product_id": 1, "quantity": 2}))
        .await;
    let (status, body) = app.post_empty("/api/checkout").await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["success"], false);

    // The wallet is untouched.
    let (_, me) = app.get("/api/auth/me").await;
    assert_eq!(me["wallet_balance"], "1500.00");
}

#[tokio::test]
async fn checkout_drains_the_wallet_and_records_the_order() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    // 999.99 + 49.99 = 1049.98
    app.post("/api/cart/items", json!({"product_id": 1})).await;
    app.post("/api/cart/items", json!({"product_id": 6})).await;
    let (status, receipt) = app.post_empty("/api/checkout").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["wallet_balance"], "450.02");
    assert_eq!(receipt["order"]["id"], 5);
    assert_eq!(receipt["order"]["total"], "1049.98");
    assert_eq!(receipt["order"]["status"], "processing");
    assert_eq!(receipt["order"]["delivery_agent_id"], 8);

    // Cart is cleared.
    let (_, count) = app.get("/api/cart/count").await;
    assert_eq!(count["count"], 0);

    // Stock was decremented.
    let (_, catalog) = app.get("/api/products?search=iPhone").await;
    assert_eq!(catalog[0]["stock"], 24);

    // The order shows up in the customer's history.
    let (_, orders) = app.get("/api/orders").await;
    assert_eq!(orders.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn checkout_rejects_overselling() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;

    // Kitchen Mixer has 8 in stock; adding is allowed, checkout is not.
    app.post("/api/cart/items", json!({"product_id": 9, "quantity": 9}))
        .await;
    let (status, _) = app.post_empty("/api/checkout").await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn logout_discards_the_cart() {
    let mut app = TestApp::new();
    app.login_as(demo::CUSTOMER1).await;
    app.post("/api/cart/items", json!({"product_id": 1})).await;

    app.post_empty("/api/auth/logout").await;
    app.login_as(demo::CUSTOMER1).await;

    let (_, count) = app.get("/api/cart/count").await;
    assert_eq!(count["count"], 0);
}
