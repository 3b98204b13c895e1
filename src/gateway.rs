//! The Glin payment gateway and its registration with the host checkout.
//!
//! [`PaymentGateway`] is the capability interface the host's checkout engine
//! consumes polymorphically; [`GatewayRegistry`] is the ordered list of
//! registered gateways; [`GlinGateway`] wires merchant configuration and the
//! host collaborators into the remittance flow.

use crate::availability;
use crate::config::{GatewayConfig, SUCCESS_ORDER_PARAM};
use crate::email::render_instructions;
use crate::errors::{GlinError, Result};
use crate::host::{CartProvider, NoticeSink, OrderRepository};
use crate::api::RemittanceApi;
use crate::types::{
    Order, PaymentOutcome, RemittanceRequest, META_CHECKOUT_URL, META_STATUS, META_TRANSACTION_ID,
};
use crate::utils::{format_amount, remittance_expiry};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Stable identifier of the Glin gateway.
pub const GATEWAY_ID: &str = "glin-plugin";

/// Generic shopper-facing notice shown when the remote API rejects a payment.
pub const PAYMENT_FAILED_NOTICE: &str =
    "Ocorreu um erro ao realizar o pagamento, tente de novo!";

/// Capability interface a payment gateway exposes to the host checkout.
///
/// One behavior set per gateway; the host holds these as trait objects in the
/// order they registered.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Stable gateway identifier.
    fn id(&self) -> &str;

    /// Title shown on the payment selection screen.
    fn title(&self) -> &str;

    /// Description shown on the payment selection screen.
    fn description(&self) -> &str;

    /// Whether this gateway should be offered for the current checkout.
    ///
    /// `pay_order` is the order being paid on the order-pay flow, if any.
    fn is_available(&self, pay_order: Option<&Order>) -> bool;

    /// Initiates a payment for the given order.
    async fn process_payment(&self, order_id: &str) -> PaymentOutcome;

    /// Instructions block for an outgoing order email, if any.
    fn email_instructions(
        &self,
        order: &Order,
        sent_to_admin: bool,
        plain_text: bool,
    ) -> Option<String>;

    /// Content for the order-received (thank-you) page, if any.
    fn thankyou_page(&self) -> Option<String> {
        None
    }
}

/// Ordered list of payment gateways available to the host checkout.
#[derive(Default)]
pub struct GatewayRegistry {
    gateways: Vec<Arc<dyn PaymentGateway>>,
}

impl GatewayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a gateway to the list of selectable payment methods.
    ///
    /// Registration is unconditional; availability is evaluated per checkout.
    pub fn register(&mut self, gateway: Arc<dyn PaymentGateway>) {
        self.gateways.push(gateway);
    }

    /// All registered gateways, in registration order.
    pub fn gateways(&self) -> &[Arc<dyn PaymentGateway>] {
        &self.gateways
    }

    /// The gateways available for the current checkout, in registration
    /// order.
    pub fn available(&self, pay_order: Option<&Order>) -> Vec<Arc<dyn PaymentGateway>> {
        self.gateways
            .iter()
            .filter(|gateway| gateway.is_available(pay_order))
            .cloned()
            .collect()
    }

    /// Looks up a registered gateway by identifier.
    pub fn find(&self, id: &str) -> Option<Arc<dyn PaymentGateway>> {
        self.gateways.iter().find(|gateway| gateway.id() == id).cloned()
    }
}

/// The Glin payment gateway.
///
/// Holds the merchant configuration and the injected host collaborators.
/// Configuration is immutable after construction.
pub struct GlinGateway {
    config: GatewayConfig,
    api: Arc<dyn RemittanceApi>,
    orders: Arc<dyn OrderRepository>,
    cart: Arc<dyn CartProvider>,
    notices: Arc<dyn NoticeSink>,
}

impl GlinGateway {
    /// Creates the gateway from its configuration and collaborators.
    pub fn new(
        config: GatewayConfig,
        api: Arc<dyn RemittanceApi>,
        orders: Arc<dyn OrderRepository>,
        cart: Arc<dyn CartProvider>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            config,
            api,
            orders,
            cart,
            notices,
        }
    }

    /// The resolved merchant configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Builds the remittance request for an order.
    ///
    /// The expiry is computed from the current instant; the success URL gets
    /// the order id appended so the storefront can resolve the order on
    /// return.
    fn build_request(&self, order: &Order) -> RemittanceRequest {
        let mut success_url = self.config.success_url.clone();
        success_url
            .query_pairs_mut()
            .append_pair(SUCCESS_ORDER_PARAM, &order.id);

        RemittanceRequest {
            client_reference_id: order.id.clone(),
            amount: format_amount(order.total),
            currency: self.config.currency.clone(),
            expires_at: remittance_expiry(Utc::now()),
            success_url: success_url.into(),
            cancel_url: self.config.cancel_url.to_string(),
        }
    }

    /// The remittance flow proper; errors are collapsed at the
    /// `process_payment` boundary.
    async fn try_payment(&self, order_id: &str) -> Result<Url> {
        let mut order = self
            .orders
            .find(order_id)
            .ok_or_else(|| GlinError::OrderNotFound(order_id.to_string()))?;

        let request = self.build_request(&order);
        let remittance = self.api.create_remittance(&request).await?;

        order.update_meta(META_TRANSACTION_ID, &remittance.id);
        order.update_meta(META_CHECKOUT_URL, remittance.checkout_url.as_str());
        order.update_meta(META_STATUS, &remittance.status);
        order.add_note(remittance.checkout_url.as_str());
        order.add_note(&remittance.id);
        self.orders.save(&order)?;

        self.cart.clear();

        info!(order_id, transaction_id = %remittance.id, "payment initiated");
        Ok(remittance.checkout_url)
    }
}

#[async_trait]
impl PaymentGateway for GlinGateway {
    fn id(&self) -> &str {
        GATEWAY_ID
    }

    fn title(&self) -> &str {
        &self.config.title
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn is_available(&self, pay_order: Option<&Order>) -> bool {
        self.config.enabled
            && availability::shipping_allows(
                &self.config.enable_for_methods,
                self.cart.as_ref(),
                pay_order,
            )
    }

    async fn process_payment(&self, order_id: &str) -> PaymentOutcome {
        match self.try_payment(order_id).await {
            Ok(redirect) => PaymentOutcome::Success { redirect },
            Err(err) => {
                warn!(order_id, error = %err, "payment initiation failed");
                if matches!(err, GlinError::Api { .. }) {
                    self.notices.error(PAYMENT_FAILED_NOTICE);
                }
                PaymentOutcome::Fail
            }
        }
    }

    fn email_instructions(
        &self,
        order: &Order,
        sent_to_admin: bool,
        plain_text: bool,
    ) -> Option<String> {
        if self.config.instructions.is_empty()
            || sent_to_admin
            || order.payment_method != GATEWAY_ID
        {
            return None;
        }
        Some(render_instructions(&self.config.instructions, plain_text))
    }

    fn thankyou_page(&self) -> Option<String> {
        if self.config.instructions.is_empty() {
            return None;
        }
        Some(render_instructions(&self.config.instructions, false))
    }
}
