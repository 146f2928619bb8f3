use crate::error::SecretError;
use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ssm::{GetParameterRequest, Ssm, SsmClient};

#[async_trait]
pub trait ResolveSecret: Send + Sync {
    async fn resolve(&self, key: &str) -> Result<String, SecretError>;
}

/// Reads decrypted values from SSM Parameter Store.
pub struct ParameterStoreClient {
    client: SsmClient,
}

#[async_trait]
impl ResolveSecret for ParameterStoreClient {
    async fn resolve(&self, key: &str) -> Result<String, SecretError> {
        let output = self
            .client
            .get_parameter(GetParameterRequest {
                name: key.to_string(),
                with_decryption: Some(true),
                ..Default::default()
            })
            .await?;
        output
            .parameter
            .and_then(|parameter| parameter.value)
            .ok_or_else(|| SecretError::NotFound(key.to_string()))
    }
}

impl ParameterStoreClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(SsmClient::new(region))
    }

    fn new_with_client(client: SsmClient) -> Self {
        ParameterStoreClient { client }
    }
}
