//! Integration tests for the glin-gateway library.
//!
//! These tests run the whole payment flow against an axum mock of the Glin
//! merchant API: remittance creation, order metadata recording, cart
//! clearing, and the failure branches.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use http::{HeaderMap, StatusCode};
use glin_gateway::api::GlinApi;
use glin_gateway::config::GatewayConfig;
use glin_gateway::gateway::{GlinGateway, PaymentGateway, GATEWAY_ID, PAYMENT_FAILED_NOTICE};
use glin_gateway::host::{CartProvider, NoticeSink, OrderRepository};
use glin_gateway::{
    Order, PaymentOutcome, Result, ShippingRate, META_CHECKOUT_URL, META_STATUS,
    META_TRANSACTION_ID,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

#[derive(Default)]
struct MemoryOrders {
    orders: Mutex<HashMap<String, Order>>,
}

impl MemoryOrders {
    fn with(order: Order) -> Arc<Self> {
        Arc::new(Self {
            orders: Mutex::new(HashMap::from([(order.id.clone(), order)])),
        })
    }

    fn get(&self, id: &str) -> Order {
        self.orders.lock().unwrap().get(id).cloned().unwrap()
    }
}

impl OrderRepository for MemoryOrders {
    fn find(&self, order_id: &str) -> Option<Order> {
        self.orders.lock().unwrap().get(order_id).cloned()
    }

    fn save(&self, order: &Order) -> Result<()> {
        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeCart {
    cleared: AtomicBool,
}

impl CartProvider for FakeCart {
    fn needs_shipping(&self) -> bool {
        false
    }

    fn chosen_rates(&self) -> Vec<ShippingRate> {
        Vec::new()
    }

    fn clear(&self) {
        self.cleared.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct RecordingNotices {
    messages: Mutex<Vec<String>>,
}

impl NoticeSink for RecordingNotices {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// What the mock Glin API saw for the last remittance creation call.
#[derive(Default)]
struct Received {
    authorization: Mutex<Option<String>>,
    body: Mutex<Option<Value>>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn spawn_mock(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/merchant-api/remittances/")
}

/// Mock endpoint answering 200 with a well-formed remittance.
async fn spawn_ok_mock(received: Arc<Received>) -> String {
    let app = Router::new()
        .route(
            "/merchant-api/remittances/",
            post(
                |State(received): State<Arc<Received>>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    *received.authorization.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string);
                    *received.body.lock().unwrap() = Some(body);
                    Json(json!({
                        "id": "tx_1",
                        "checkoutUrl": "https://pay.glin.com.br/c/tx_1",
                        "status": "pending"
                    }))
                },
            ),
        )
        .with_state(received);
    spawn_mock(app).await
}

fn config(endpoint: &str) -> GatewayConfig {
    GatewayConfig::new(
        "glin_test_token",
        "https://shop.example/checkout/received/",
        "https://shop.example/cart/",
    )
    .unwrap()
    .with_enabled(true)
    .with_endpoint(Url::parse(endpoint).unwrap())
    .with_timeout(Duration::from_secs(5))
}

struct Harness {
    gateway: GlinGateway,
    orders: Arc<MemoryOrders>,
    cart: Arc<FakeCart>,
    notices: Arc<RecordingNotices>,
}

fn harness(config: GatewayConfig) -> Harness {
    let orders = MemoryOrders::with(Order::new("1042", dec!(199.90)));
    let cart = Arc::new(FakeCart::default());
    let notices = Arc::new(RecordingNotices::default());
    let api = Arc::new(
        GlinApi::new(config.endpoint.clone(), config.token.clone(), config.timeout).unwrap(),
    );
    let gateway = GlinGateway::new(config, api, orders.clone(), cart.clone(), notices.clone());
    Harness {
        gateway,
        orders,
        cart,
        notices,
    }
}

#[tokio::test]
async fn successful_payment_end_to_end() {
    init_tracing();
    let received = Arc::new(Received::default());
    let endpoint = spawn_ok_mock(received.clone()).await;
    let h = harness(config(&endpoint));

    let outcome = h.gateway.process_payment("1042").await;
    assert_eq!(
        outcome,
        PaymentOutcome::Success {
            redirect: Url::parse("https://pay.glin.com.br/c/tx_1").unwrap()
        }
    );

    let saved = h.orders.get("1042");
    assert_eq!(saved.metadata.get(META_TRANSACTION_ID).unwrap(), "tx_1");
    assert_eq!(
        saved.metadata.get(META_CHECKOUT_URL).unwrap(),
        "https://pay.glin.com.br/c/tx_1"
    );
    assert_eq!(saved.metadata.get(META_STATUS).unwrap(), "pending");
    assert_eq!(saved.notes.len(), 2);
    assert!(h.cart.cleared.load(Ordering::SeqCst));
    assert!(h.notices.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn outbound_request_carries_token_and_body() {
    let received = Arc::new(Received::default());
    let endpoint = spawn_ok_mock(received.clone()).await;
    let h = harness(config(&endpoint));

    h.gateway.process_payment("1042").await;

    assert_eq!(
        received.authorization.lock().unwrap().as_deref(),
        Some("Bearer glin_test_token")
    );

    let body = received.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["clientReferenceId"], "1042");
    assert_eq!(body["amount"], "199.90");
    assert_eq!(body["currency"], "USD");
    assert_eq!(
        body["successUrl"],
        "https://shop.example/checkout/received/?order-id-glin=1042"
    );
    assert_eq!(body["cancelUrl"], "https://shop.example/cart/");
    let expires_at = body["expiresAt"].as_str().unwrap();
    assert!(expires_at.ends_with('Z'));
    assert_eq!(expires_at.len(), "2024-05-04T12:00:00Z".len());
}

#[tokio::test]
async fn server_error_fails_without_side_effects() {
    let app = Router::new().route(
        "/merchant-api/remittances/",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let endpoint = spawn_mock(app).await;
    let h = harness(config(&endpoint));

    let outcome = h.gateway.process_payment("1042").await;
    assert_eq!(outcome, PaymentOutcome::Fail);

    let saved = h.orders.get("1042");
    assert!(saved.metadata.is_empty());
    assert!(saved.notes.is_empty());
    assert!(!h.cart.cleared.load(Ordering::SeqCst));
    assert_eq!(
        *h.notices.messages.lock().unwrap(),
        vec![PAYMENT_FAILED_NOTICE.to_string()]
    );
}

#[tokio::test]
async fn transport_failure_fails_without_side_effects() {
    // Bind and immediately drop a listener so the port is free but closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = format!("http://{addr}/merchant-api/remittances/");
    let h = harness(config(&endpoint));

    let outcome = h.gateway.process_payment("1042").await;
    assert_eq!(outcome, PaymentOutcome::Fail);

    let saved = h.orders.get("1042");
    assert!(saved.metadata.is_empty());
    assert!(!h.cart.cleared.load(Ordering::SeqCst));
    // Transport failures carry no shopper notice, matching the non-200 branch only.
    assert!(h.notices.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_success_body_fails_without_side_effects() {
    let app = Router::new().route(
        "/merchant-api/remittances/",
        post(|| async { Json(json!({"id": "tx_1"})) }),
    );
    let endpoint = spawn_mock(app).await;
    let h = harness(config(&endpoint));

    let outcome = h.gateway.process_payment("1042").await;
    assert_eq!(outcome, PaymentOutcome::Fail);

    let saved = h.orders.get("1042");
    assert!(saved.metadata.is_empty());
    assert!(!h.cart.cleared.load(Ordering::SeqCst));
}

#[tokio::test]
async fn gateway_built_from_persisted_settings() -> anyhow::Result<()> {
    init_tracing();
    let received = Arc::new(Received::default());
    let endpoint = spawn_ok_mock(received.clone()).await;

    let settings = HashMap::from([
        ("enabled".to_string(), "yes".to_string()),
        ("token".to_string(), "glin_test_token".to_string()),
        ("title".to_string(), "Pix via Glin".to_string()),
        ("instructions".to_string(), "Pague em até 3 dias.".to_string()),
        (
            "success_url".to_string(),
            "https://shop.example/checkout/received/".to_string(),
        ),
        ("cancel_url".to_string(), "https://shop.example/cart/".to_string()),
    ]);

    let config = GatewayConfig::from_settings(&settings)?
        .with_endpoint(Url::parse(&endpoint)?)
        .with_timeout(Duration::from_secs(5));

    let h = harness(config);
    assert_eq!(h.gateway.id(), GATEWAY_ID);
    assert_eq!(h.gateway.title(), "Pix via Glin");
    assert!(h.gateway.is_available(None));

    let outcome = h.gateway.process_payment("1042").await;
    assert!(outcome.is_success());

    let mut paid = h.orders.get("1042");
    paid.payment_method = GATEWAY_ID.to_string();
    assert_eq!(
        h.gateway.email_instructions(&paid, false, true),
        Some("Pague em até 3 dias.\n".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn outcome_serializes_to_host_shape() {
    let received = Arc::new(Received::default());
    let endpoint = spawn_ok_mock(received).await;
    let h = harness(config(&endpoint));

    let outcome = h.gateway.process_payment("1042").await;
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["result"], "success");
    assert_eq!(json["redirect"], "https://pay.glin.com.br/c/tx_1");

    let fail = h.gateway.process_payment("missing").await;
    assert_eq!(serde_json::to_value(&fail).unwrap(), json!({"result": "fail"}));
}
