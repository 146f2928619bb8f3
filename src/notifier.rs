use crate::alarm_message::{decode_alarm_message, DiskAlarm};
use crate::config::NotifierConfig;
use crate::error::{DecodeError, RecordError, SecretError};
use crate::event::{raw_message_id, SnsEvent, SnsEventRecord};
use serde_json::Value;
use std::convert::TryFrom;
use crate::parameter_store_client::ResolveSecret;
use crate::webhook_client::{Deliver, DeliveryResponse, OutboundMessage};
use serde::Serialize;
use tracing::{debug, error, info, warn};

pub const NOTIFIED_BODY: &str = "Rocket.Chat notified: Disk alarm";
pub const NOTHING_PROCESSED_BODY: &str = "No valid SNS records processed or all failed.";

/// What the Lambda returns to its invoker.
#[derive(Debug, PartialEq, Serialize)]
pub struct HandlerOutput {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerOutput {
    fn secret_failure(error: &SecretError) -> Self {
        HandlerOutput {
            status_code: 500,
            body: format!("SSM parameter fetch error: {}", error),
        }
    }

    fn delivered(response: &DeliveryResponse) -> Self {
        HandlerOutput {
            status_code: response.status,
            body: NOTIFIED_BODY.to_string(),
        }
    }

    fn nothing_processed() -> Self {
        HandlerOutput {
            status_code: 200,
            body: NOTHING_PROCESSED_BODY.to_string(),
        }
    }
}

/// Forwards disk alarms from one SNS batch to the chat webhook.
///
/// The webhook url is resolved once per call to [`Notifier::handle`], before
/// any record is looked at. Records are tried in order and the first one
/// that is delivered ends the batch. Records that fail to decode or deliver
/// are logged and skipped; only a failed url lookup yields a 500.
pub struct Notifier<'a, S, D> {
    secrets: &'a S,
    delivery: &'a D,
    config: &'a NotifierConfig,
}

impl<'a, S, D> Notifier<'a, S, D>
where
    S: ResolveSecret,
    D: Deliver,
{
    pub fn new(secrets: &'a S, delivery: &'a D, config: &'a NotifierConfig) -> Self {
        Notifier {
            secrets,
            delivery,
            config,
        }
    }

    pub async fn handle(&self, batch: &SnsEvent) -> HandlerOutput {
        let endpoint = match self.secrets.resolve(&self.config.parameter_name).await {
            Ok(endpoint) => endpoint,
            Err(e) => {
                error!(parameter = %self.config.parameter_name, error = %e, "SSM fetch error");
                return HandlerOutput::secret_failure(&e);
            }
        };

        for (index, record) in batch.records.iter().enumerate() {
            match self.process_record(&endpoint, record).await {
                Ok(response) => {
                    info!(
                        index,
                        message_id = raw_message_id(record),
                        status = response.status,
                        body = %response.body,
                        "Rocket.Chat notified"
                    );
                    return HandlerOutput::delivered(&response);
                }
                Err(e) => {
                    warn!(
                        index,
                        message_id = raw_message_id(record),
                        error = %e,
                        "error processing record"
                    );
                }
            }
        }

        info!(records = batch.records.len(), "no record delivered");
        HandlerOutput::nothing_processed()
    }

    async fn process_record(
        &self,
        endpoint: &str,
        record: &Value,
    ) -> Result<DeliveryResponse, RecordError> {
        let record = SnsEventRecord::try_from(record)?;
        let raw = record.message().ok_or(DecodeError::MissingMessage)?;
        let message = decode_alarm_message(raw)?;
        if let Some(sns) = record.sns.as_ref() {
            debug!(
                topic_arn = ?sns.topic_arn,
                subject = ?sns.subject,
                published_at = ?record.published_at(),
                "decoded alarm notification"
            );
        }
        debug!(
            old_state = ?message.old_state_value,
            state_change_time = ?message.state_change_time,
            dimensions = ?message.dimensions(),
            "received dimensions"
        );

        let alarm = DiskAlarm::from(&message);
        let outbound = OutboundMessage::new(alarm.to_message());
        let response = self
            .delivery
            .post(endpoint, &outbound, self.config.delivery_timeout)
            .await?;
        Ok(response)
    }
}
