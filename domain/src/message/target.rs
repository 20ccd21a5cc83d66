//! Converse-shaped messages.
//!
//! The Converse API takes system prompts as a separate list and every
//! conversational turn as a list of content blocks. These types are
//! SDK-agnostic; the infrastructure layer maps them onto
//! `aws_sdk_bedrockruntime::types`.

use serde::{Deserialize, Serialize};

/// An instruction-only segment sent outside the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPrompt {
    pub text: String,
}

impl SystemPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Role of a conversational turn. Converse has no `system` role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    User,
    Assistant,
}

/// Image encodings accepted by Converse image blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }

    /// Resolve a file extension (case-insensitive). `jpg` maps to `jpeg`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single block within a [`TargetMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetContent {
    Text(String),
    Image { format: ImageFormat, bytes: Vec<u8> },
}

impl TargetContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TargetContent::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A conversational turn ready for the Converse API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMessage {
    pub role: ConversationRole,
    pub content: Vec<TargetContent>,
}

impl TargetMessage {
    pub fn new(role: ConversationRole, content: Vec<TargetContent>) -> Self {
        Self { role, content }
    }
}
