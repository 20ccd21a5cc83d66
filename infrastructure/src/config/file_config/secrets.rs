//! Secret store configuration from TOML (`[secrets]` section)

use super::bedrock::DEFAULT_REGION;
use crate::secrets::DEFAULT_SECRET_NAME;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSecretsConfig {
    /// Fetch the secret at startup (default: false)
    pub enabled: bool,
    /// Secret id (default: "LangFuse-LLM-monitoring")
    pub name: String,
    /// Secrets Manager region (default: "us-east-1")
    pub region: String,
}

impl FileSecretsConfig {
    /// Name of the secret to fetch at startup, if fetching is enabled
    pub fn startup_secret(&self) -> Option<&str> {
        self.enabled.then_some(self.name.as_str())
    }
}

impl Default for FileSecretsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: DEFAULT_SECRET_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names_monitoring_secret_but_is_disabled() {
        let config = FileSecretsConfig::default();
        assert_eq!(config.name, "LangFuse-LLM-monitoring");
        assert_eq!(config.startup_secret(), None);
    }

    #[test]
    fn test_enabled_uses_configured_name() {
        let config = FileSecretsConfig {
            enabled: true,
            ..Default::default()
        };
        assert_eq!(config.startup_secret(), Some(DEFAULT_SECRET_NAME));

        let custom = FileSecretsConfig {
            enabled: true,
            name: "team/observability".to_string(),
            ..Default::default()
        };
        assert_eq!(custom.startup_secret(), Some("team/observability"));
    }
}
