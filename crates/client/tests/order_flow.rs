//! Integration tests for order submission against a mock gateway.
//!
//! Covers the authenticated path: POST to `/api/orders/`, cart clearing,
//! and the server-confirmed order landing in the stored profile's history.

use std::time::Duration;

use rust_decimal::Decimal;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bazaar_client::{
    AuthService, CartStore, GatewayClient, GatewayConfig, LocalStore, OrderAssembler,
};
use bazaar_core::{
    Address, AddressId, OrderStatus, PaymentMethod, PaymentMethodId, Product, ProductId,
};

fn gateway_for(server: &MockServer) -> GatewayClient {
    GatewayClient::new(&GatewayConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        timeout: Duration::from_secs(2),
    })
}

fn address() -> Address {
    Address {
        id: AddressId::new(1),
        full_name: "Asha Rao".to_string(),
        phone: "+911234567890".to_string(),
        address_line1: "14 Temple Street".to_string(),
        address_line2: String::new(),
        city: "Chennai".to_string(),
        state: "TN".to_string(),
        zip_code: "600001".to_string(),
        country: "India".to_string(),
        is_default: true,
    }
}

fn payment() -> PaymentMethod {
    PaymentMethod {
        id: PaymentMethodId::new(1),
        kind: "card".to_string(),
        card_number: "**** **** **** 4242".to_string(),
        card_holder: "Asha Rao".to_string(),
        expiry_month: 12,
        expiry_year: 2027,
        is_default: true,
    }
}

fn product(id: i64, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::from(price),
        original_price: None,
        images: Vec::new(),
    }
}

/// A server-confirmed order as the gateway would return it: the backend
/// assigned a tracking number and already confirmed the order.
fn confirmed_order_json() -> serde_json::Value {
    serde_json::json!({
        "id": "ORD-1700000000000",
        "date": "2023-11-14T22:13:20Z",
        "status": "confirmed",
        "items": [{
            "productId": 1,
            "productName": "Product 1",
            "productImage": "",
            "quantity": 2,
            "price": "1000",
            "total": "2000"
        }],
        "subtotal": "2000",
        "shipping": "500",
        "tax": "360",
        "discount": "0",
        "total": "2860",
        "shippingAddress": {
            "id": 1,
            "fullName": "Asha Rao",
            "phone": "+911234567890",
            "addressLine1": "14 Temple Street",
            "city": "Chennai",
            "state": "TN",
            "zipCode": "600001",
            "country": "India",
            "isDefault": true
        },
        "paymentMethod": {
            "id": 1,
            "type": "card",
            "cardNumber": "**** **** **** 4242",
            "cardHolder": "Asha Rao",
            "expiryMonth": 12,
            "expiryYear": 2027,
            "isDefault": true
        },
        "trackingNumber": "TRK-481516",
        "estimatedDelivery": "2023-11-21"
    })
}

#[tokio::test]
async fn test_authenticated_order_submits_clears_cart_and_records_history() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmed_order_json()))
        .expect(1)
        .mount(&server)
        .await;

    // add_line mirrors remotely for bound identities; accept it.
    Mock::given(method("POST"))
        .and(path("/cart/1/items"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let gateway = gateway_for(&server);

    let auth = AuthService::new(store.clone());
    auth.login("asha@example.com", "hunter2").unwrap();
    let session = auth.session();

    let mut cart = CartStore::load(store.clone(), gateway.clone());
    cart.add_line(&session, product(1, 1000), 2).await;

    let assembler = OrderAssembler::new(store, gateway);
    let order = assembler
        .create_order(&mut cart, &session, address(), payment())
        .await
        .unwrap();

    // The server-confirmed order is returned, not the locally built one.
    assert_eq!(order.id.as_str(), "ORD-1700000000000");
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.tracking_number, "TRK-481516");

    assert!(cart.is_empty());

    // Recorded in the stored profile's history.
    let history = assembler.list_orders(&session);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, order.id);
    assert_eq!(
        assembler.find_order(&session, &order.id).unwrap().status,
        OrderStatus::Confirmed
    );
}

#[tokio::test]
async fn test_failed_submission_propagates_and_keeps_cart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cart/1/items"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let gateway = gateway_for(&server);

    let auth = AuthService::new(store.clone());
    auth.login("asha@example.com", "hunter2").unwrap();
    let session = auth.session();

    let mut cart = CartStore::load(store.clone(), gateway.clone());
    cart.add_line(&session, product(1, 1000), 2).await;

    let assembler = OrderAssembler::new(store, gateway);
    let result = assembler
        .create_order(&mut cart, &session, address(), payment())
        .await;

    assert!(result.is_err());

    // Cart untouched, no history recorded.
    assert_eq!(cart.total_quantity(), 2);
    assert!(assembler.list_orders(&session).is_empty());
}

#[tokio::test]
async fn test_cancel_confirmed_order_in_profile_history() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmed_order_json()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cart/1/items"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let gateway = gateway_for(&server);

    let auth = AuthService::new(store.clone());
    auth.login("asha@example.com", "hunter2").unwrap();
    let session = auth.session();

    let mut cart = CartStore::load(store.clone(), gateway.clone());
    cart.add_line(&session, product(1, 1000), 2).await;

    let assembler = OrderAssembler::new(store, gateway);
    let order = assembler
        .create_order(&mut cart, &session, address(), payment())
        .await
        .unwrap();

    // Confirmed orders may still be cancelled by the user.
    assert!(assembler.cancel_order(&session, &order.id));
    assert_eq!(
        assembler.find_order(&session, &order.id).unwrap().status,
        OrderStatus::Cancelled
    );

    // And the cancellation survives in the stored profile.
    assert_eq!(
        auth.current_user().unwrap().orders[0].status,
        OrderStatus::Cancelled
    );
}
