//! Message conversion.
//!
//! Turns OpenAI-style chat messages into the Converse shape:
//!
//! 1. `system` messages become [`SystemPrompt`]s, in input order
//! 2. every other message becomes one [`TargetMessage`] with the same role
//! 3. plain-string content becomes a single text block
//! 4. `text` parts are copied verbatim; `image_url` parts are validated,
//!    downloaded and attached as image blocks
//!
//! Image URLs are validated before anything is fetched, and images are
//! fetched one at a time in message order.

use crate::ports::image_fetcher::{ImageFetchError, ImageFetcher};
use bridge_domain::{
    ChatMessage, ContentPart, ConversationRole, ImageSource, MessageContent, Role, SystemPrompt,
    TargetContent, TargetMessage, ValidationError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while converting messages. These propagate to the caller.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Image download failed: {0}")]
    ImageFetch(#[from] ImageFetchError),
}

impl ConversionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ConversionError::Validation(_))
    }
}

/// Output of [`MessageConverter::convert`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedMessages {
    pub system: Vec<SystemPrompt>,
    pub messages: Vec<TargetMessage>,
}

/// Converts chat messages, downloading referenced images through an [`ImageFetcher`].
#[derive(Clone)]
pub struct MessageConverter {
    image_fetcher: Arc<dyn ImageFetcher>,
}

impl MessageConverter {
    pub fn new(image_fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self { image_fetcher }
    }

    pub async fn convert(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ConvertedMessages, ConversionError> {
        let mut converted = ConvertedMessages::default();

        for message in messages {
            let role = match message.role {
                Role::System => {
                    let text = message
                        .content
                        .as_text()
                        .ok_or(ValidationError::SystemContentNotText)?;
                    converted.system.push(SystemPrompt::new(text));
                    continue;
                }
                Role::User => ConversationRole::User,
                Role::Assistant => ConversationRole::Assistant,
            };

            let content = match &message.content {
                MessageContent::Text(text) => vec![TargetContent::Text(text.clone())],
                MessageContent::Parts(parts) => self.convert_parts(parts).await?,
            };
            converted.messages.push(TargetMessage::new(role, content));
        }

        Ok(converted)
    }

    async fn convert_parts(
        &self,
        parts: &[ContentPart],
    ) -> Result<Vec<TargetContent>, ConversionError> {
        let mut content = Vec::with_capacity(parts.len());

        for part in parts {
            match part {
                ContentPart::Text { text } => content.push(TargetContent::Text(text.clone())),
                ContentPart::ImageUrl { image_url } => {
                    let source = ImageSource::parse(image_url)?;
                    debug!(url = %source.url, format = %source.format, "Fetching image");
                    let bytes = self.image_fetcher.fetch(&source.url).await?;
                    content.push(TargetContent::Image {
                        format: source.format,
                        bytes,
                    });
                }
                ContentPart::Unsupported => {
                    warn!("Skipping content part with unsupported type");
                }
            }
        }

        Ok(content)
    }
}
