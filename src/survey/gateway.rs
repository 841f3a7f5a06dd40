// Client for the external ticketing service
// Issues the authenticated ticket update and profile event calls

use axum::async_trait;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::{GatewayCredentials, RelayConfig};
use crate::survey::{
    error::GatewayError,
    models::{ProfileEventPayload, TicketId, TicketUpdatePayload},
};

/// Successful downstream response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayReceipt {
    pub status: u16,
}

/// The two calls the relay makes against the ticketing service
///
/// Neither call retries.
#[async_trait]
pub trait TicketingGateway: Send + Sync {
    /// Full update of a ticket: PUT /api/v2/tickets/{id}.json
    async fn update_ticket(
        &self,
        ticket_id: &TicketId,
        payload: &TicketUpdatePayload,
    ) -> Result<GatewayReceipt, GatewayError>;

    /// New profile event: POST /api/v2/user_profiles/events
    async fn publish_event(
        &self,
        payload: &ProfileEventPayload,
    ) -> Result<GatewayReceipt, GatewayError>;
}

/// `TicketingGateway` backed by the Zendesk REST API
#[derive(Debug, Clone)]
pub struct ZendeskClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: GatewayCredentials,
}

impl ZendeskClient {
    pub fn new(base_url: Url, credentials: GatewayCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            credentials,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.base_url.clone(), config.credentials.clone())
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                GatewayError::malformed(format!("{} cannot be used as a base URL", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        url: Url,
        payload: &T,
    ) -> Result<GatewayReceipt, GatewayError> {
        tracing::debug!("{} {}", method, url);

        let response = self
            .http
            .request(method, url)
            .basic_auth(self.credentials.username(), self.credentials.api_token.as_deref())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(GatewayReceipt { status: status.as_u16() });
        }

        // Keep the downstream body verbatim for diagnostics
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Err(GatewayError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TicketingGateway for ZendeskClient {
    async fn update_ticket(
        &self,
        ticket_id: &TicketId,
        payload: &TicketUpdatePayload,
    ) -> Result<GatewayReceipt, GatewayError> {
        let resource = format!("{}.json", ticket_id);
        let url = self.endpoint(&["api", "v2", "tickets", &resource])?;
        self.send(reqwest::Method::PUT, url, payload).await
    }

    async fn publish_event(
        &self,
        payload: &ProfileEventPayload,
    ) -> Result<GatewayReceipt, GatewayError> {
        let url = self.endpoint(&["api", "v2", "user_profiles", "events"])?;
        self.send(reqwest::Method::POST, url, payload).await
    }
}
