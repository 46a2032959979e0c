//! SnailPay API client

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::credential::ApiKey;
use crate::dispatch::Dispatcher;
use crate::endpoints::{self, Endpoint};
use crate::transport::{HttpTransport, Transport};
use crate::types::*;
use crate::{Result, SnailError};

const NO_BODY: Option<&()> = None;

/// Client for the SnailPay API.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct SnailClient {
    dispatcher: Dispatcher,
    config: ClientConfig,
}

impl SnailClient {
    /// Create a client for the default host
    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(api_key: impl Into<ApiKey>, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(api_key, config, Arc::new(transport))
    }

    /// Create a client on top of a caller-supplied transport
    pub fn with_transport(
        api_key: impl Into<ApiKey>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        Ok(Self {
            dispatcher: Dispatcher::new(api_key.into(), base_url, transport),
            config,
        })
    }

    /// Create a client from `SNAIL_API_KEY`, `SNAIL_BASE_URL` and
    /// `SNAIL_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::with_config(ApiKey::from_env()?, ClientConfig::from_env()?)
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Verify a 10-character payment code.
    ///
    /// Codes of any other length are rejected without contacting the
    /// service. Any non-200 answer yields [`SnailError::InvalidCode`].
    pub async fn verify_payment(&self, code: &str) -> Result<Payment> {
        if code.chars().count() != VERIFICATION_CODE_LEN {
            return Err(SnailError::InvalidCode);
        }

        let reply = self
            .dispatcher
            .dispatch(&endpoints::VERIFY_PAYMENT, &[("code", code)], NO_BODY)
            .await?;

        if !reply.is_ok() {
            return Err(SnailError::InvalidCode);
        }
        reply.decode()
    }

    /// Create a one-off payment link
    pub async fn create_payment_link(&self, params: &PaymentLinkParams) -> Result<PaymentLink> {
        self.send(&endpoints::PAYMENT_LINK, Some(params)).await
    }

    /// Create a recurring subscription link
    pub async fn subscription_link(
        &self,
        params: &SubscriptionLinkParams,
    ) -> Result<SubscriptionLink> {
        self.send(&endpoints::SUBSCRIPTION_LINK, Some(params)).await
    }

    /// List payments
    pub async fn list_payments(&self) -> Result<Vec<ListPayment>> {
        self.list(&endpoints::PAYMENT_LIST).await
    }

    /// List subscriptions
    pub async fn list_subscriptions(&self) -> Result<Vec<ListSubscription>> {
        self.list(&endpoints::SUBSCRIPTION_LIST).await
    }

    /// List the URLs of created payment links
    pub async fn list_payment_links(&self) -> Result<Vec<String>> {
        self.list(&endpoints::PAYMENT_LINK_LIST).await
    }

    /// List the URLs of created subscription links
    pub async fn list_subscription_links(&self) -> Result<Vec<String>> {
        self.list(&endpoints::SUBSCRIPTION_LINK_LIST).await
    }

    /// Payout history and balances
    pub async fn list_payouts(&self) -> Result<Payouts> {
        self.send(&endpoints::PAYOUT, NO_BODY).await
    }

    /// Request a payout of the available balance
    pub async fn new_payout(&self) -> Result<()> {
        self.dispatcher
            .dispatch(&endpoints::NEW_PAYOUT, &[], NO_BODY)
            .await?
            .into_unit()
    }

    /// Refund the given payments
    pub async fn refund_payments<I, S>(&self, payment_ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = RefundRequest::new(payment_ids);
        self.dispatcher
            .dispatch(&endpoints::REFUND_PAYMENT, &[], Some(&request))
            .await?
            .into_unit()
    }

    async fn send<B, T>(&self, endpoint: &Endpoint, body: Option<&B>) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        self.dispatcher
            .dispatch(endpoint, &[], body)
            .await?
            .into_result()
    }

    // The service encodes an empty list as `null`.
    async fn list<T>(&self, endpoint: &Endpoint) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let rows: Option<Vec<T>> = self.send(endpoint, NO_BODY).await?;
        Ok(rows.unwrap_or_default())
    }
}
