//! Outbound client for the Glin merchant API.
//!
//! This module defines the [`RemittanceApi`] seam the payment initiator calls
//! through, and [`GlinApi`], its reqwest-backed implementation. The whole
//! exchange is one `POST` to the remittance creation endpoint.

use crate::errors::{GlinError, Result};
use crate::types::{RemittanceRequest, RemittanceResponse};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONNECTION};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Creates remittances with the payment processor.
///
/// A trait seam so payment processing can be tested against a stub without a
/// network.
#[async_trait]
pub trait RemittanceApi: Send + Sync {
    /// Creates a remittance and returns its checkout handle.
    ///
    /// Exactly one outbound call per invocation; no retries.
    async fn create_remittance(&self, request: &RemittanceRequest) -> Result<RemittanceResponse>;
}

/// Reqwest-backed client for the Glin merchant API.
///
/// # Examples
///
/// ```no_run
/// use glin_gateway::api::GlinApi;
/// use url::Url;
///
/// # fn example() -> glin_gateway::Result<()> {
/// let endpoint = Url::parse("https://pay.glin.com.br/merchant-api/remittances/")?;
/// let api = GlinApi::new(endpoint, "glin_live_token", std::time::Duration::from_secs(90))?;
/// # Ok(())
/// # }
/// ```
pub struct GlinApi {
    endpoint: Url,
    token: String,
    http: Client,
}

impl GlinApi {
    /// Creates a client for the given endpoint, bearer token and timeout.
    ///
    /// The timeout bounds the whole exchange; a request that exceeds it
    /// surfaces as a transport error.
    pub fn new(endpoint: Url, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            token: token.into(),
            http,
        })
    }
}

#[async_trait]
impl RemittanceApi for GlinApi {
    async fn create_remittance(&self, request: &RemittanceRequest) -> Result<RemittanceResponse> {
        debug!(
            client_reference_id = %request.client_reference_id,
            amount = %request.amount,
            currency = %request.currency,
            "creating remittance"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .header(CONNECTION, "keep-alive")
            .header(ACCEPT_ENCODING, "gzip, deflate, br")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "remittance creation rejected");
            return Err(GlinError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let remittance: RemittanceResponse = serde_json::from_str(&body)
            .map_err(|err| GlinError::InvalidResponse(err.to_string()))?;

        debug!(id = %remittance.id, status = %remittance.status, "remittance created");
        Ok(remittance)
    }
}
