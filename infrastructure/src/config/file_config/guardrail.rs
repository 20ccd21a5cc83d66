//! Guardrail configuration from TOML (`[guardrail]` section)

use super::{ConfigIssue, Severity};
use bridge_domain::GuardrailConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GUARDRAIL_VERSION: &str = "DRAFT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGuardrailConfig {
    /// Guardrail id or ARN; no guardrail is applied when unset
    pub identifier: Option<String>,
    /// Guardrail version (default: "DRAFT")
    pub version: String,
    /// `"enabled"`, `"enabled_full"` or `"disabled"`
    pub trace: Option<String>,
}

impl Default for FileGuardrailConfig {
    fn default() -> Self {
        Self {
            identifier: None,
            version: DEFAULT_GUARDRAIL_VERSION.to_string(),
            trace: None,
        }
    }
}

impl FileGuardrailConfig {
    pub fn to_guardrail_config(&self) -> Option<GuardrailConfig> {
        let identifier = self.identifier.as_ref()?;
        Some(GuardrailConfig {
            guardrail_identifier: identifier.clone(),
            guardrail_version: self.version.clone(),
            trace: self.trace.clone(),
        })
    }

    pub(super) fn validate(&self, issues: &mut Vec<ConfigIssue>) {
        if self.identifier.is_none() {
            return;
        }
        if self.version.trim().is_empty() {
            issues.push(ConfigIssue::new(
                Severity::Error,
                "guardrail.version",
                "guardrail.version cannot be empty when guardrail.identifier is set",
            ));
        }
        if let Some(ref trace) = self.trace
            && !["enabled", "enabled_full", "disabled"].contains(&trace.as_str())
        {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "guardrail.trace",
                format!("guardrail.trace: unknown value '{}'", trace),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_identifier_means_no_guardrail() {
        assert!(FileGuardrailConfig::default().to_guardrail_config().is_none());
    }

    #[test]
    fn test_to_guardrail_config() {
        let config = FileGuardrailConfig {
            identifier: Some("gr-abc".to_string()),
            trace: Some("enabled".to_string()),
            ..Default::default()
        };
        let converted = config.to_guardrail_config().unwrap();
        assert_eq!(converted.guardrail_identifier, "gr-abc");
        assert_eq!(converted.guardrail_version, "DRAFT");
        assert_eq!(converted.trace.as_deref(), Some("enabled"));
    }

    #[test]
    fn test_validate() {
        let config = FileGuardrailConfig {
            identifier: Some("gr-abc".to_string()),
            version: " ".to_string(),
            trace: Some("verbose".to_string()),
        };
        let mut issues = Vec::new();
        config.validate(&mut issues);
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["guardrail.version", "guardrail.trace"]);
    }
}
