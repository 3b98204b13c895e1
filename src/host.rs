//! Collaborator traits abstracting the host e-commerce platform.
//!
//! The original plugin reached cart, session and order state through ambient
//! platform globals. Here those collaborators are explicit trait objects
//! injected into the gateway, so payment processing can be exercised in
//! isolation.

use crate::errors::Result;
use crate::types::{Order, ShippingRate};

/// Read/write access to the host platform's order storage.
///
/// The host owns persistence and concurrency control; the adapter performs a
/// plain read-modify-write with no optimistic check.
pub trait OrderRepository: Send + Sync {
    /// Resolves an order by its identifier.
    fn find(&self, order_id: &str) -> Option<Order>;

    /// Persists an order mutated by the adapter.
    fn save(&self, order: &Order) -> Result<()>;
}

/// The shopper's active cart and chosen shipping methods.
pub trait CartProvider: Send + Sync {
    /// Whether the cart contents require shipping.
    fn needs_shipping(&self) -> bool;

    /// The shipping rates chosen for the cart's packages.
    fn chosen_rates(&self) -> Vec<ShippingRate>;

    /// Empties the cart after a successful payment initiation.
    fn clear(&self);
}

/// Sink for shopper-facing checkout notices.
pub trait NoticeSink: Send + Sync {
    /// Surfaces an error notice on the checkout page.
    fn error(&self, message: &str);
}
