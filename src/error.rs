use rusoto_core::RusotoError;
use rusoto_ssm::GetParameterError;
use thiserror::Error;

/// Failure to resolve the webhook endpoint. Always fatal for the invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SecretError {
    #[error("parameter not found: {0}")]
    NotFound(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("parameter store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed SNS record: {0}")]
    InvalidRecord(serde_json::Error),
    #[error("record has no Sns.Message")]
    MissingMessage,
    #[error("invalid alarm payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("alarm payload is a JSON {0}, expected an object")]
    UnexpectedShape(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeliveryError {
    #[error("webhook request timed out")]
    Timeout,
    #[error("webhook connection failed: {0}")]
    Connection(String),
    #[error("webhook returned HTTP {0}")]
    Status(u16),
    #[error("invalid webhook url: {0}")]
    InvalidUrl(String),
}

/// Anything that makes a single record get skipped.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl From<RusotoError<GetParameterError>> for SecretError {
    fn from(e: RusotoError<GetParameterError>) -> SecretError {
        match e {
            RusotoError::Service(GetParameterError::ParameterNotFound(message))
            | RusotoError::Service(GetParameterError::ParameterVersionNotFound(message)) => {
                SecretError::NotFound(message)
            }
            RusotoError::Service(GetParameterError::InvalidKeyId(message)) => {
                SecretError::AccessDenied(message)
            }
            RusotoError::Unknown(ref response)
                if response.status.as_u16() == 403
                    || response.body_as_str().contains("AccessDenied") =>
            {
                SecretError::AccessDenied(response.body_as_str().to_string())
            }
            other => SecretError::Unavailable(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> DeliveryError {
        if e.is_timeout() {
            DeliveryError::Timeout
        } else if e.is_builder() {
            DeliveryError::InvalidUrl(e.to_string())
        } else if let Some(status) = e.status() {
            DeliveryError::Status(status.as_u16())
        } else {
            DeliveryError::Connection(e.to_string())
        }
    }
}
