//! Process-wide adapters shared by the invokers.
//!
//! [`BridgeContext`] is built once at startup and handed to every invocation.
//! It owns the gateway, image fetcher, telemetry reporter and the optional
//! secret loaded from the secret store. All of them are read-only afterwards.

use crate::ports::converse_gateway::ConverseGateway;
use crate::ports::image_fetcher::ImageFetcher;
use crate::ports::secret_store::{SecretError, SecretStore};
use crate::ports::telemetry::TelemetryReporter;
use crate::use_cases::converse_chat::ConverseChatUseCase;
use crate::use_cases::converse_tool_use::ConverseToolUseUseCase;
use std::fmt;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct BridgeContext {
    gateway: Arc<dyn ConverseGateway>,
    image_fetcher: Arc<dyn ImageFetcher>,
    telemetry: Arc<dyn TelemetryReporter>,
    secret: Option<Arc<str>>,
}

impl BridgeContext {
    pub fn new(
        gateway: Arc<dyn ConverseGateway>,
        image_fetcher: Arc<dyn ImageFetcher>,
        telemetry: Arc<dyn TelemetryReporter>,
    ) -> Self {
        Self {
            gateway,
            image_fetcher,
            telemetry,
            secret: None,
        }
    }

    /// Fetch the secret named `name` once and keep it for the lifetime of the context.
    pub async fn with_secret_from(
        mut self,
        store: &dyn SecretStore,
        name: &str,
    ) -> Result<Self, SecretError> {
        let secret = store.get_secret(name).await?;
        info!(name, "Loaded secret");
        self.secret = Some(Arc::from(secret));
        Ok(self)
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn chat(&self) -> ConverseChatUseCase {
        ConverseChatUseCase::new(
            self.gateway.clone(),
            self.image_fetcher.clone(),
            self.telemetry.clone(),
        )
    }

    pub fn tool_use(&self) -> ConverseToolUseUseCase {
        ConverseToolUseUseCase::new(
            self.gateway.clone(),
            self.image_fetcher.clone(),
            self.telemetry.clone(),
        )
    }
}

impl fmt::Debug for BridgeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeContext")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}
