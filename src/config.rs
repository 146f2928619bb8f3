use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PARAMETER_NAME: &str = "/rocketchat/webhook_url";
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Names checked in order for the SSM parameter holding the webhook url.
const PARAMETER_NAME_VARS: [&str; 2] = ["WEBHOOK_PARAM_NAME", "WEBHOOK_PARAM"];
const TIMEOUT_VAR: &str = "WEBHOOK_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    pub parameter_name: String,
    pub delivery_timeout: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            parameter_name: DEFAULT_PARAMETER_NAME.to_string(),
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }
}

impl NotifierConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parameter_name = PARAMETER_NAME_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PARAMETER_NAME.to_string());

        let delivery_timeout = match lookup(TIMEOUT_VAR) {
            None => DEFAULT_DELIVERY_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "ignoring invalid {}", TIMEOUT_VAR);
                    DEFAULT_DELIVERY_TIMEOUT
                }
            },
        };

        NotifierConfig {
            parameter_name,
            delivery_timeout,
        }
    }
}
