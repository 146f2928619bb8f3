mod alarm_message;
mod config;
mod error;
mod event;
mod notifier;
mod parameter_store_client;
mod webhook_client;

use anyhow::anyhow;
use lambda_runtime::{handler_fn, Context, Error};
use once_cell::sync::Lazy;
use rusoto_core::Region;
use serde_json::Value;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::NotifierConfig;
use crate::event::SnsEvent;
use crate::notifier::{HandlerOutput, Notifier};
use crate::parameter_store_client::ParameterStoreClient;
use crate::webhook_client::WebhookClient;

// Shared by warm invocations for connection reuse. Nothing resolved per
// invocation is kept here.
static PARAMETER_STORE: Lazy<ParameterStoreClient> =
    Lazy::new(|| ParameterStoreClient::new(Region::default()));
static WEBHOOK: Lazy<WebhookClient> = Lazy::new(WebhookClient::new);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .without_time()
        .try_init()
        .map_err(|error| anyhow!(error))?;

    lambda_runtime::run(handler_fn(notify_handler))
        .await
        .map_err(|error| anyhow!(error))?;
    Ok(())
}

async fn notify_handler(event: Value, context: Context) -> Result<HandlerOutput, Error> {
    debug!(request_id = %context.request_id, event = %event, "raw event");

    let batch = serde_json::from_value::<SnsEvent>(event).unwrap_or_else(|e| {
        warn!(request_id = %context.request_id, error = %e, "event is not an SNS batch");
        SnsEvent::default()
    });
    let config = NotifierConfig::from_env();
    let notifier = Notifier::new(&*PARAMETER_STORE, &*WEBHOOK, &config);
    Ok(notifier.handle(&batch).await)
}
