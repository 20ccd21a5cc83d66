//! AWS Secrets Manager adapter

use crate::aws::load_sdk_config;
use async_trait::async_trait;
use aws_sdk_secretsmanager::Client as SecretsClient;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use bridge_application::{SecretError, SecretStore};
use tracing::debug;

/// Secret holding the observability backend credentials
pub const DEFAULT_SECRET_NAME: &str = "LangFuse-LLM-monitoring";

pub struct AwsSecretStore {
    client: SecretsClient,
}

impl AwsSecretStore {
    pub fn new(client: SecretsClient) -> Self {
        Self { client }
    }

    pub async fn connect(region: &str, profile: Option<&str>) -> Self {
        let config = load_sdk_config(region, profile).await;
        Self::new(SecretsClient::new(&config))
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        debug!(name, "Fetching secret");

        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| SecretError::Retrieval {
                name: name.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| SecretError::NotAString(name.to_string()))
    }
}
