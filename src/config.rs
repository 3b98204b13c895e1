//! Merchant configuration for the Glin gateway.
//!
//! This module defines [`GatewayConfig`], the settings resolved from the host
//! platform's configuration storage, and the settings-form schema the host
//! renders on its payment settings page.

use crate::errors::{GlinError, Result};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Default remittance creation endpoint of the Glin merchant API.
pub const DEFAULT_ENDPOINT: &str = "https://pay.glin.com.br/merchant-api/remittances/";

/// Default currency code for remittance requests.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default gateway title shown on the payment selection screen.
pub const DEFAULT_TITLE: &str = "Glin";

/// Default gateway description shown on the payment selection screen.
pub const DEFAULT_DESCRIPTION: &str = "Realize o pagamento no Pix ou Cartão!";

/// Bound on the outbound remittance creation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Query parameter appended to the success URL so the storefront can resolve
/// the order on return.
pub const SUCCESS_ORDER_PARAM: &str = "order-id-glin";

/// Merchant-entered gateway settings.
///
/// Loaded once at adapter construction and immutable for the remainder of a
/// request's processing.
///
/// # Examples
///
/// ```
/// use glin_gateway::config::GatewayConfig;
///
/// let config = GatewayConfig::new(
///     "glin_live_token",
///     "https://shop.example/checkout/received/",
///     "https://shop.example/cart/",
/// )
/// .unwrap()
/// .with_enabled(true)
/// .with_instructions("Pay within 3 days using the emailed link.");
///
/// assert!(config.enabled);
/// assert_eq!(config.currency, "USD");
/// ```
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Whether the merchant has enabled this payment method
    pub enabled: bool,

    /// Glin merchant API integration token
    pub token: String,

    /// Title the shopper sees on the payment selection screen
    pub title: String,

    /// Description the shopper sees on the payment selection screen
    pub description: String,

    /// Instructions appended to customer emails and the thank-you page
    pub instructions: String,

    /// Shipping-method allow-list; entries are `method_id` or
    /// `method_id:instance_id`. Empty means no restriction.
    pub enable_for_methods: Vec<String>,

    /// ISO 4217 currency code sent with every remittance
    pub currency: String,

    /// Storefront page Glin redirects to after a completed payment
    pub success_url: Url,

    /// Storefront page Glin redirects to after an abandoned payment
    pub cancel_url: Url,

    /// Remittance creation endpoint
    pub endpoint: Url,

    /// Bound on the outbound HTTP call
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a configuration from the integration token and the storefront
    /// redirect pages.
    ///
    /// All other fields start from their defaults; the gateway is disabled
    /// until [`with_enabled`](Self::with_enabled) turns it on.
    pub fn new(
        token: impl Into<String>,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            enabled: false,
            token: token.into(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            instructions: String::new(),
            enable_for_methods: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            success_url: Url::parse(success_url)?,
            cancel_url: Url::parse(cancel_url)?,
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Enables or disables the gateway.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the shopper-facing title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the shopper-facing description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the email/thank-you instructions text.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Restricts the gateway to the given shipping methods.
    pub fn with_enable_for_methods(mut self, methods: Vec<String>) -> Self {
        self.enable_for_methods = methods;
        self
    }

    /// Sets the currency code sent with remittances.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Points the adapter at a different remittance endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Overrides the outbound call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves a configuration from the host's persisted settings values.
    ///
    /// The map holds the stored value for each key of [`settings_fields`];
    /// absent keys fall back to each field's default. `enabled` is true only
    /// for the literal `"yes"`; `enable_for_methods` is comma-separated.
    ///
    /// Returns [`GlinError::Config`] when a redirect URL is missing or
    /// unparsable.
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| settings.get(key).map(String::as_str);

        let success_url = get("success_url")
            .ok_or_else(|| GlinError::Config("missing success_url".to_string()))?;
        let cancel_url = get("cancel_url")
            .ok_or_else(|| GlinError::Config("missing cancel_url".to_string()))?;

        let mut config = Self::new(get("token").unwrap_or_default(), success_url, cancel_url)
            .map_err(|err| GlinError::Config(err.to_string()))?;

        config.enabled = get("enabled") == Some("yes");
        if let Some(title) = get("title") {
            config.title = title.to_string();
        }
        if let Some(description) = get("description") {
            config.description = description.to_string();
        }
        if let Some(instructions) = get("instructions") {
            config.instructions = instructions.to_string();
        }
        if let Some(methods) = get("enable_for_methods") {
            config.enable_for_methods = methods
                .split(',')
                .map(str::trim)
                .filter(|method| !method.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(currency) = get("currency") {
            config.currency = currency.to_string();
        }

        Ok(config)
    }
}

/// Rendering kind of a settings-form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// On/off toggle persisted as `"yes"`/`"no"`
    Checkbox,
    /// Single-line text input
    Text,
    /// Single-line text input with markup stripped on save
    SafeText,
    /// Multi-line text input
    Textarea,
}

/// One field of the settings form the host renders for this gateway.
#[derive(Clone, Debug)]
pub struct SettingsField {
    /// Storage key
    pub key: &'static str,
    /// Field label
    pub title: &'static str,
    /// Rendering kind
    pub kind: FieldKind,
    /// Help text shown next to the field
    pub description: &'static str,
    /// Default stored value
    pub default: &'static str,
}

/// The settings-form schema for the Glin gateway.
///
/// The host renders and persists these fields; the adapter only reads the
/// resolved values through [`GatewayConfig::from_settings`].
pub fn settings_fields() -> Vec<SettingsField> {
    vec![
        SettingsField {
            key: "enabled",
            title: "Ativar/Desativar",
            kind: FieldKind::Checkbox,
            description: "Ativar método de pagamento - Glin",
            default: "no",
        },
        SettingsField {
            key: "token",
            title: "Adicionar Token de integração",
            kind: FieldKind::Text,
            description: "",
            default: "",
        },
        SettingsField {
            key: "title",
            title: "Título",
            kind: FieldKind::SafeText,
            description: "Título que o cliente verá na tela de pagamento",
            default: DEFAULT_TITLE,
        },
        SettingsField {
            key: "description",
            title: "Descrição",
            kind: FieldKind::Textarea,
            description: "Descrição do método de pagamento",
            default: DEFAULT_DESCRIPTION,
        },
        SettingsField {
            key: "instructions",
            title: "Instruções",
            kind: FieldKind::Textarea,
            description: "Instruções enviadas nos e-mails do pedido",
            default: "",
        },
        SettingsField {
            key: "enable_for_methods",
            title: "Métodos de envio",
            kind: FieldKind::Text,
            description: "Restringir a métodos de envio (method_id ou method_id:instance_id, separados por vírgula)",
            default: "",
        },
        SettingsField {
            key: "success_url",
            title: "URL de sucesso",
            kind: FieldKind::Text,
            description: "Página do pedido recebido na loja",
            default: "",
        },
        SettingsField {
            key: "cancel_url",
            title: "URL de cancelamento",
            kind: FieldKind::Text,
            description: "Página do carrinho na loja",
            default: "",
        },
    ]
}
