use crate::error::DecodeError;
use serde::Deserialize;
use serde_json::Value;

const UNKNOWN_DIMENSION: &str = "unknown";
const UNKNOWN_ALARM: &str = "UnknownAlarm";
const UNKNOWN_STATE: &str = "UNKNOWN";
const NO_REASON: &str = "No reason provided.";

/// CloudWatch alarm state-change notification as published to SNS.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmMessage {
    pub alarm_name: Option<String>,
    pub new_state_value: Option<String>,
    pub new_state_reason: Option<String>,
    pub old_state_value: Option<String>,
    pub state_change_time: Option<String>,
    pub trigger: Option<Trigger>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trigger {
    pub dimensions: Option<Vec<Dimension>>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub name: String,
    pub value: Option<String>,
}

impl AlarmMessage {
    pub fn dimensions(&self) -> &[Dimension] {
        self.trigger
            .as_ref()
            .and_then(|trigger| trigger.dimensions.as_deref())
            .unwrap_or(&[])
    }

    /// Value of the first dimension whose name matches, ignoring ASCII case.
    /// A matching dimension without a value counts as absent.
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions()
            .iter()
            .find(|dimension| dimension.name.eq_ignore_ascii_case(name))
            .and_then(|dimension| dimension.value.as_deref())
    }
}

/// Decodes an SNS `Message` into an [`AlarmMessage`].
///
/// Some publishers JSON-encode the alarm twice, so the first pass can
/// yield a JSON string. That string is decoded once more before the
/// object is read.
pub fn decode_alarm_message(raw: &str) -> Result<AlarmMessage, DecodeError> {
    let value = match serde_json::from_str::<Value>(raw)? {
        Value::String(inner) => serde_json::from_str::<Value>(&inner)?,
        value => value,
    };
    match value {
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        Value::Null => Err(DecodeError::UnexpectedShape("null")),
        Value::Bool(_) => Err(DecodeError::UnexpectedShape("boolean")),
        Value::Number(_) => Err(DecodeError::UnexpectedShape("number")),
        Value::String(_) => Err(DecodeError::UnexpectedShape("string")),
        Value::Array(_) => Err(DecodeError::UnexpectedShape("array")),
    }
}

/// The fields a disk alarm notification is rendered from, defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskAlarm {
    pub alarm_name: String,
    pub new_state: String,
    pub path: String,
    pub instance_id: String,
    pub fstype: String,
    pub reason: String,
}

impl From<&AlarmMessage> for DiskAlarm {
    fn from(message: &AlarmMessage) -> Self {
        let dimension = |name: &str| {
            message
                .dimension(name)
                .unwrap_or(UNKNOWN_DIMENSION)
                .to_string()
        };
        DiskAlarm {
            alarm_name: message
                .alarm_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_ALARM.to_string()),
            new_state: message
                .new_state_value
                .clone()
                .unwrap_or_else(|| UNKNOWN_STATE.to_string()),
            path: dimension("path"),
            instance_id: dimension("instanceid"),
            fstype: dimension("fstype"),
            reason: message
                .new_state_reason
                .clone()
                .unwrap_or_else(|| NO_REASON.to_string()),
        }
    }
}

impl DiskAlarm {
    pub fn to_message(&self) -> String {
        format!(
            "*Disk Alarm Triggered*\n\
             `{}` is now in state: *{}*\n\
             🔹 Volume: `{}`\n\
             🔹 Instance ID: `{}`\n\
             🔹 Filesystem: `{}`\n\
             🔹 Reason: {}",
            self.alarm_name, self.new_state, self.path, self.instance_id, self.fstype, self.reason
        )
    }
}
