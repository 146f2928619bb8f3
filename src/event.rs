use crate::error::DecodeError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;

/// The batch handed to one invocation by the SNS subscription.
///
/// Records stay untyped here so that one malformed record cannot fail the
/// whole batch; each is converted with [`SnsEventRecord::try_from`] when it
/// is processed.
#[derive(Debug, Default, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<Value>,
}

/// `Sns.MessageId` of a raw record, for logging.
pub fn raw_message_id(record: &Value) -> &str {
    record
        .pointer("/Sns/MessageId")
        .and_then(Value::as_str)
        .unwrap_or("-")
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEventRecord {
    pub sns: Option<SnsMessage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    pub message_id: Option<String>,
    pub topic_arn: Option<String>,
    pub subject: Option<String>,
    /// CloudWatch alarm payload, JSON text that may itself be JSON-quoted.
    pub message: Option<String>,
    pub timestamp: Option<String>,
}

impl TryFrom<&Value> for SnsEventRecord {
    type Error = DecodeError;

    fn try_from(record: &Value) -> Result<Self, Self::Error> {
        SnsEventRecord::deserialize(record).map_err(DecodeError::InvalidRecord)
    }
}

impl SnsEventRecord {
    pub fn message(&self) -> Option<&str> {
        self.sns.as_ref()?.message.as_deref()
    }

    /// Publish time of the notification, if SNS sent a parseable one.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let timestamp = self.sns.as_ref()?.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(timestamp)
            .ok()
            .map(|time| time.with_timezone(&Utc))
    }
}
