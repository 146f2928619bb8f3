use crate::error::DeliveryError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Body of a Rocket.Chat incoming webhook call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub text: String,
}

impl OutboundMessage {
    pub fn new(text: String) -> Self {
        OutboundMessage { text }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Deliver: Send + Sync {
    async fn post(
        &self,
        url: &str,
        message: &OutboundMessage,
        timeout: Duration,
    ) -> Result<DeliveryResponse, DeliveryError>;
}

pub struct WebhookClient {
    client: reqwest::Client,
}

#[async_trait]
impl Deliver for WebhookClient {
    async fn post(
        &self,
        url: &str,
        message: &OutboundMessage,
        timeout: Duration,
    ) -> Result<DeliveryResponse, DeliveryError> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(DeliveryError::Status(status.as_u16()));
        }
        // Success is decided by the status alone; the body is best-effort.
        let body = response.text().await.unwrap_or_default();
        Ok(DeliveryResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl WebhookClient {
    pub fn new() -> Self {
        Self::new_with_client(reqwest::Client::new())
    }

    fn new_with_client(client: reqwest::Client) -> Self {
        WebhookClient { client }
    }
}
