//! Shipping-method availability filtering.
//!
//! Decides whether the gateway should be offered for a given checkout
//! context. The gateway is unrestricted unless the merchant configured a
//! shipping-method allow-list and the purchase actually needs shipping; in
//! that case the chosen rates must intersect the allow-list, either by full
//! `method_id:instance_id` or by bare `method_id`.

use crate::host::CartProvider;
use crate::types::{Order, ShippingRate};

/// Whether the current purchase requires shipping.
///
/// True when the active cart needs shipping, or, on the order-pay flow, when
/// any of the order's line items references a shippable product.
pub fn needs_shipping(cart: &dyn CartProvider, pay_order: Option<&Order>) -> bool {
    if cart.needs_shipping() {
        return true;
    }
    pay_order.is_some_and(Order::needs_shipping)
}

/// Converts chosen rates to their canonical `method_id:instance_id` form.
pub fn canonical_rate_ids(rates: &[ShippingRate]) -> Vec<String> {
    rates.iter().map(ShippingRate::canonical_id).collect()
}

/// The `method_id` part of a canonical rate id.
pub fn method_id(rate_id: &str) -> &str {
    rate_id.split(':').next().unwrap_or(rate_id)
}

/// Allow-list entries activated by the given canonical rate ids.
///
/// Entries match either a full canonical id or the bare `method_id` prefix of
/// one. The result is deduplicated; availability only cares whether it is
/// empty.
pub fn matching_rates<'a>(allow_list: &'a [String], rate_ids: &[String]) -> Vec<&'a str> {
    let mut matches: Vec<&str> = allow_list
        .iter()
        .filter(|entry| {
            rate_ids.iter().any(|rate_id| {
                entry.as_str() == rate_id || entry.as_str() == method_id(rate_id)
            })
        })
        .map(String::as_str)
        .collect();
    matches.dedup();
    matches
}

/// Whether the configured shipping restriction allows this checkout.
///
/// With an empty allow-list, or a purchase that needs no shipping, the
/// gateway is unconditionally allowed. Otherwise the rates recorded on the
/// pay-order (when present) take precedence over the cart session's chosen
/// rates, and at least one must activate an allow-list entry.
pub fn shipping_allows(
    allow_list: &[String],
    cart: &dyn CartProvider,
    pay_order: Option<&Order>,
) -> bool {
    if allow_list.is_empty() || !needs_shipping(cart, pay_order) {
        return true;
    }

    let order_rates = pay_order
        .map(|order| order.shipping_rates.as_slice())
        .filter(|rates| !rates.is_empty());

    let rate_ids = match order_rates {
        Some(rates) => canonical_rate_ids(rates),
        None => canonical_rate_ids(&cart.chosen_rates()),
    };

    !matching_rates(allow_list, &rate_ids).is_empty()
}
