//! Integration tests for the profile service's gateway CRUD.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bazaar_client::{GatewayClient, GatewayConfig, Identity, ProfileService, SessionContext};
use bazaar_core::{ProductId, UserId};

const USER: i64 = 7;

fn session() -> SessionContext {
    SessionContext::authenticated(Identity::new(
        UserId::new(USER),
        SecretString::from("session.test"),
    ))
}

fn service_for(server: &MockServer) -> ProfileService {
    ProfileService::new(GatewayClient::new(&GatewayConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        timeout: Duration::from_secs(2),
    }))
}

#[tokio::test]
async fn test_addresses_listed_from_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{USER}/addresses")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 1,
            "fullName": "Asha Rao",
            "phone": "+911234567890",
            "addressLine1": "14 Temple Street",
            "city": "Chennai",
            "state": "TN",
            "zipCode": "600001",
            "country": "India",
            "isDefault": true
        }])))
        .mount(&server)
        .await;

    let addresses = service_for(&server).addresses(&session()).await;
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].city, "Chennai");
}

#[tokio::test]
async fn test_address_fetch_failure_falls_back_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{USER}/addresses")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let addresses = service_for(&server).addresses(&session()).await;
    assert!(addresses.is_empty());
}

#[tokio::test]
async fn test_anonymous_sessions_never_touch_the_gateway() {
    // No mocks mounted: any request would 404 and the strict expectations
    // below would fail the test.
    let server = MockServer::start().await;
    let service = service_for(&server);
    let anonymous = SessionContext::anonymous();

    assert!(service.addresses(&anonymous).await.is_empty());
    assert!(service.payment_methods(&anonymous).await.is_empty());
    assert!(service.wishlist(&anonymous).await.is_empty());
    assert!(!service.add_to_wishlist(&anonymous, ProductId::new(1)).await);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wishlist_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/users/{USER}/wishlist")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{USER}/wishlist")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "productId": 3 },
            { "productId": 8 },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/users/{USER}/wishlist/3")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let session = session();

    assert!(service.add_to_wishlist(&session, ProductId::new(3)).await);
    assert_eq!(
        service.wishlist(&session).await,
        vec![ProductId::new(3), ProductId::new(8)]
    );
    assert!(service.remove_from_wishlist(&session, ProductId::new(3)).await);
}

#[tokio::test]
async fn test_payment_method_registration() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/users/{USER}/payments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 2,
            "type": "card",
            "cardNumber": "**** **** **** 1881",
            "cardHolder": "Asha Rao",
            "expiryMonth": 6,
            "expiryYear": 2028,
            "isDefault": false
        })))
        .mount(&server)
        .await;

    let stored = service_for(&server)
        .add_payment_method(&session(), "razorpay", "tok_abc123")
        .await
        .unwrap();

    assert_eq!(stored.card_number, "**** **** **** 1881");
    assert_eq!(stored.kind, "card");
}
