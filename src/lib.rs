//! # glin-gateway
//!
//! A payment-gateway adapter that lets an e-commerce checkout accept payments
//! through the Glin payment processor.
//!
//! The adapter registers itself with the host's checkout pipeline, reads
//! merchant configuration, and at checkout time creates a remote payment
//! request (a "remittance"), then redirects the shopper to Glin's hosted
//! checkout page. On success it records transaction metadata on the order,
//! appends order notes and clears the cart; it also renders payment
//! instructions into customer emails and the thank-you page.
//!
//! ## Features
//!
//! - **Gateway registration**: a [`gateway::PaymentGateway`] capability trait
//!   and an ordered [`gateway::GatewayRegistry`] of selectable methods
//! - **Availability filtering**: shipping-method allow-list evaluation for
//!   carts and order-pay flows
//! - **Payment initiation**: one remittance creation call per checkout
//!   submission, with order metadata and notes recorded on success
//! - **Email instructions**: sanitized paragraph rendering for customer
//!   emails and the thank-you page
//! - **Explicit collaborators**: orders, cart and notices are injected trait
//!   objects, so the whole flow is testable without a host platform
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glin_gateway::api::GlinApi;
//! use glin_gateway::config::GatewayConfig;
//! use glin_gateway::gateway::{GlinGateway, PaymentGateway};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     orders: Arc<dyn glin_gateway::host::OrderRepository>,
//! #     cart: Arc<dyn glin_gateway::host::CartProvider>,
//! #     notices: Arc<dyn glin_gateway::host::NoticeSink>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::new(
//!     "glin_live_token",
//!     "https://shop.example/checkout/received/",
//!     "https://shop.example/cart/",
//! )?
//! .with_enabled(true);
//!
//! let api = Arc::new(GlinApi::new(
//!     config.endpoint.clone(),
//!     config.token.clone(),
//!     config.timeout,
//! )?);
//!
//! let gateway = GlinGateway::new(config, api, orders, cart, notices);
//! let outcome = gateway.process_payment("1042").await;
//! println!("{}", serde_json::to_string(&outcome)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Payment flow
//!
//! 1. **Host lists gateways**: availability is evaluated per checkout context
//! 2. **Shopper submits checkout**: the host calls `process_payment` with the
//!    order id
//! 3. **Adapter creates a remittance**: one `POST` to the Glin merchant API
//!    with the order total, a 3-day expiry and the storefront redirect URLs
//! 4. **Adapter records the result**: transaction id, checkout URL and status
//!    land in order metadata; two order notes are added; the cart is cleared
//! 5. **Shopper is redirected**: to Glin's hosted checkout page
//!
//! Failures (transport, non-200, malformed response) collapse to a generic
//! `fail` result with no side effects; detail is kept in logs only.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod availability;
pub mod config;
pub mod email;
pub mod errors;
pub mod gateway;
pub mod host;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use errors::{GlinError, Result};
pub use gateway::{GatewayRegistry, GlinGateway, PaymentGateway, GATEWAY_ID};
pub use types::{
    Order, OrderItem, PaymentOutcome, RemittanceRequest, RemittanceResponse, ShippingRate,
    META_CHECKOUT_URL, META_STATUS, META_TRANSACTION_ID,
};
