//! Core type definitions for the Glin gateway adapter.
//!
//! This module contains the wire types exchanged with the Glin merchant API
//! and the host-platform domain types (orders, shipping rates) the adapter
//! reads and mutates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Order metadata key holding the remittance transaction id.
pub const META_TRANSACTION_ID: &str = "id_transacao";

/// Order metadata key holding the hosted checkout URL.
pub const META_CHECKOUT_URL: &str = "url";

/// Order metadata key holding the remittance status reported by Glin.
pub const META_STATUS: &str = "status";

/// Request body for creating a remittance with the Glin merchant API.
///
/// Constructed fresh for every payment attempt and never persisted locally.
///
/// # Examples
///
/// ```
/// use glin_gateway::types::RemittanceRequest;
///
/// let request = RemittanceRequest {
///     client_reference_id: "1042".to_string(),
///     amount: "199.90".to_string(),
///     currency: "USD".to_string(),
///     expires_at: "2024-05-04T12:00:00Z".to_string(),
///     success_url: "https://shop.example/thanks?order-id-glin=1042".to_string(),
///     cancel_url: "https://shop.example/cart".to_string(),
/// };
/// assert_eq!(request.currency, "USD");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemittanceRequest {
    /// Merchant-side reference, set to the order identifier
    #[serde(rename = "clientReferenceId")]
    pub client_reference_id: String,

    /// Order total formatted with exactly two fraction digits
    pub amount: String,

    /// ISO 4217 currency code
    pub currency: String,

    /// Expiry instant, UTC with a literal `Z` suffix (creation time + 3 days)
    #[serde(rename = "expiresAt")]
    pub expires_at: String,

    /// Where Glin redirects the shopper after a completed payment
    #[serde(rename = "successUrl")]
    pub success_url: String,

    /// Where Glin redirects the shopper after an abandoned payment
    #[serde(rename = "cancelUrl")]
    pub cancel_url: String,
}

/// Successful response body from the remittance creation endpoint.
///
/// All three fields are required; a 200 response missing any of them is
/// rejected as invalid instead of propagating undefined values into order
/// metadata.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RemittanceResponse {
    /// Remittance transaction identifier
    pub id: String,

    /// Hosted checkout page the shopper is redirected to
    #[serde(rename = "checkoutUrl")]
    pub checkout_url: Url,

    /// Initial remittance status (e.g., "pending")
    pub status: String,
}

/// Result of a payment attempt, in the shape the host checkout consumes.
///
/// Serializes to `{"result":"success","redirect":...}` or
/// `{"result":"fail"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum PaymentOutcome {
    /// Remittance created; send the shopper to the hosted checkout page
    Success {
        /// Hosted checkout URL returned by Glin
        redirect: Url,
    },
    /// Payment could not be initiated; the shopper stays on the checkout page
    Fail,
}

impl PaymentOutcome {
    /// Returns `true` for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentOutcome::Success { .. })
    }
}

/// A single line item of an order, reduced to what availability needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Host-side product reference
    pub product_id: String,

    /// Whether the referenced product requires shipping
    pub needs_shipping: bool,
}

/// A shipping method chosen for an order or cart package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingRate {
    /// Shipping method identifier (e.g., "flat_rate")
    pub method_id: String,

    /// Zone-specific instance identifier
    pub instance_id: String,
}

impl ShippingRate {
    /// Creates a rate from its method and instance identifiers.
    pub fn new(method_id: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            method_id: method_id.into(),
            instance_id: instance_id.into(),
        }
    }

    /// Canonical `method_id:instance_id` form used by the availability
    /// allow-list.
    pub fn canonical_id(&self) -> String {
        format!("{}:{}", self.method_id, self.instance_id)
    }
}

/// An order as seen by the adapter.
///
/// The host platform owns and persists orders; the adapter reads the id,
/// total and items, and appends metadata entries and notes through
/// [`crate::host::OrderRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Opaque order identifier
    pub id: String,

    /// Authoritative checkout total
    pub total: Decimal,

    /// Line items
    pub items: Vec<OrderItem>,

    /// Identifier of the payment method selected for this order
    pub payment_method: String,

    /// Shipping methods recorded on the order (order-pay flow)
    pub shipping_rates: Vec<ShippingRate>,

    /// Key-unique metadata written by payment processing
    pub metadata: BTreeMap<String, String>,

    /// Free-form notes appended by payment processing
    pub notes: Vec<String>,
}

impl Order {
    /// Creates an order with the given id and total and no items.
    pub fn new(id: impl Into<String>, total: Decimal) -> Self {
        Self {
            id: id.into(),
            total,
            items: Vec::new(),
            payment_method: String::new(),
            shipping_rates: Vec::new(),
            metadata: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    /// Sets a metadata entry, replacing any previous value for the key.
    pub fn update_meta(&mut self, key: &str, value: impl Into<String>) {
        self.metadata.insert(key.to_string(), value.into());
    }

    /// Appends an order note.
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Whether any line item of this order requires shipping.
    pub fn needs_shipping(&self) -> bool {
        self.items.iter().any(|item| item.needs_shipping)
    }
}
