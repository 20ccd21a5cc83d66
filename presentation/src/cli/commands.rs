//! CLI command definitions

use bridge_domain::{ConverseParams, GuardrailConfig, PromptRef, ToolChoice};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// CLI arguments for converse-bridge
#[derive(Parser, Debug)]
#[command(name = "converse-bridge")]
#[command(author, version, about = "Send OpenAI-style chat and tool requests to Bedrock Converse")]
#[command(long_about = r#"
converse-bridge converts OpenAI-style chat messages (and function tools) to the
AWS Bedrock Converse API, runs one call and prints the result.

Messages are a JSON array of {"role", "content"} objects. Content is a string
or a list of {"type": "text"} / {"type": "image_url"} parts; image URLs are
downloaded and attached inline.

Configuration files are loaded from (in priority order):
1. CONVERSE_BRIDGE_* environment variables
2. --config <path>               Explicit config file
3. ./converse-bridge.toml        Project-level config
4. ~/.config/converse-bridge/config.toml   Global config

Example:
  converse-bridge chat --messages conversation.json
  converse-bridge tool-use --messages ask.json --tools tools.json --tool-choice any
  cat conversation.json | converse-bridge chat --messages - --max-tokens 256
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a chat completion and print the reply text
    Chat(ChatArgs),
    /// Offer function tools and print the requested tool calls as JSON
    ToolUse(ToolUseArgs),
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub invocation: InvocationArgs,
}

#[derive(Args, Debug)]
pub struct ToolUseArgs {
    #[command(flatten)]
    pub invocation: InvocationArgs,

    /// JSON file with OpenAI tool definitions
    #[arg(long, value_name = "FILE")]
    pub tools: PathBuf,

    /// "auto", "any", or the name of a tool the model must call
    #[arg(long, value_name = "CHOICE", default_value = "auto", value_parser = parse_tool_choice)]
    pub tool_choice: ToolChoice,
}

/// Options shared by every invocation
#[derive(Args, Debug)]
pub struct InvocationArgs {
    /// JSON file with the chat messages ("-" reads stdin)
    #[arg(long, value_name = "FILE")]
    pub messages: PathBuf,

    /// Model or inference profile id (overrides config)
    #[arg(long, value_name = "ID")]
    pub model_id: Option<String>,

    /// Maximum tokens to generate (overrides config)
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (overrides config)
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// JSON object of model-specific request fields, merged over config
    #[arg(long, value_name = "JSON", value_parser = parse_json_object)]
    pub additional_fields: Option<Map<String, Value>>,

    /// Guardrail id or ARN to evaluate the request against (overrides config)
    #[arg(long, value_name = "ID")]
    pub guardrail_id: Option<String>,

    /// Guardrail version [default: DRAFT]
    #[arg(long, value_name = "VERSION", requires = "guardrail_id")]
    pub guardrail_version: Option<String>,

    /// Guardrail trace mode
    #[arg(long, value_name = "MODE", value_parser = ["enabled", "enabled_full", "disabled"])]
    pub guardrail_trace: Option<String>,

    /// JSON object merged into the observation metadata
    #[arg(long, value_name = "JSON")]
    pub metadata: Option<String>,

    /// Managed prompt the messages were rendered from
    #[arg(long, value_name = "NAME")]
    pub prompt_name: Option<String>,

    /// Version of the managed prompt
    #[arg(long, value_name = "VERSION", requires = "prompt_name")]
    pub prompt_version: Option<u32>,
}

impl InvocationArgs {
    pub fn reads_stdin(&self) -> bool {
        self.messages.as_os_str() == "-"
    }

    pub fn prompt(&self) -> Option<PromptRef> {
        self.prompt_name
            .as_ref()
            .map(|name| PromptRef::new(name, self.prompt_version))
    }

    /// Configured parameters overlaid with command-line overrides.
    ///
    /// Additional fields merge key by key; a `--guardrail-id` replaces the
    /// configured guardrail.
    pub fn converse_params(&self, defaults: ConverseParams) -> ConverseParams {
        let mut params = defaults;

        let mut inference = params.inference_config.take().unwrap_or_default();
        if let Some(max_tokens) = self.max_tokens {
            inference.max_tokens = Some(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            inference.temperature = Some(temperature);
        }
        params.inference_config = (!inference.is_empty()).then_some(inference);

        if let Some(ref fields) = self.additional_fields {
            params
                .additional_model_request_fields
                .get_or_insert_with(Map::new)
                .extend(fields.clone());
        }

        if let Some(ref identifier) = self.guardrail_id {
            params.guardrail_config = Some(GuardrailConfig {
                guardrail_identifier: identifier.clone(),
                guardrail_version: self
                    .guardrail_version
                    .clone()
                    .unwrap_or_else(|| "DRAFT".to_string()),
                trace: None,
            });
        }
        if let Some(ref trace) = self.guardrail_trace
            && let Some(ref mut guardrail) = params.guardrail_config
        {
            guardrail.trace = Some(trace.clone());
        }

        params
    }
}

fn parse_json_object(s: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str(s) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_tool_choice(s: &str) -> Result<ToolChoice, String> {
    if s.trim().is_empty() {
        return Err("tool choice cannot be empty".to_string());
    }
    Ok(ToolChoice::parse(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_domain::InferenceConfig;
    use serde_json::json;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_chat() {
        let cli = parse(&[
            "converse-bridge",
            "-vv",
            "chat",
            "--messages",
            "conversation.json",
            "--max-tokens",
            "128",
        ]);

        assert_eq!(cli.verbose, 2);
        let Some(Command::Chat(args)) = cli.command else {
            panic!("expected chat command");
        };
        assert_eq!(args.invocation.messages, PathBuf::from("conversation.json"));
        assert_eq!(args.invocation.max_tokens, Some(128));
        assert!(!args.invocation.reads_stdin());
    }

    #[test]
    fn test_parse_tool_use_choices() {
        for (choice, expected) in [
            ("auto", ToolChoice::Auto),
            ("any", ToolChoice::Any),
            ("lookup", ToolChoice::Named("lookup".to_string())),
        ] {
            let cli = parse(&[
                "converse-bridge",
                "tool-use",
                "--messages",
                "-",
                "--tools",
                "tools.json",
                "--tool-choice",
                choice,
            ]);
            let Some(Command::ToolUse(args)) = cli.command else {
                panic!("expected tool-use command");
            };
            assert_eq!(args.tool_choice, expected);
            assert!(args.invocation.reads_stdin());
        }
    }

    #[test]
    fn test_tool_choice_defaults_to_auto() {
        let cli = parse(&[
            "converse-bridge",
            "tool-use",
            "--messages",
            "m.json",
            "--tools",
            "t.json",
        ]);
        let Some(Command::ToolUse(args)) = cli.command else {
            panic!("expected tool-use command");
        };
        assert_eq!(args.tool_choice, ToolChoice::Auto);
    }

    #[test]
    fn test_prompt_version_requires_name() {
        let result = Cli::try_parse_from([
            "converse-bridge",
            "chat",
            "--messages",
            "m.json",
            "--prompt-version",
            "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = parse(&["converse-bridge", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_converse_params_overrides_defaults() {
        let cli = parse(&[
            "converse-bridge",
            "chat",
            "--messages",
            "m.json",
            "--temperature",
            "0.7",
            "--prompt-name",
            "support",
            "--prompt-version",
            "4",
        ]);
        let Some(Command::Chat(args)) = cli.command else {
            panic!("expected chat command");
        };

        let defaults = ConverseParams::default().with_inference_config(InferenceConfig {
            max_tokens: Some(1000),
            temperature: Some(0.1),
            ..Default::default()
        });
        let params = args.invocation.converse_params(defaults);
        let inference = params.inference_config.unwrap();
        assert_eq!(inference.max_tokens, Some(1000));
        assert_eq!(inference.temperature, Some(0.7));
        assert_eq!(
            args.invocation.prompt(),
            Some(PromptRef::new("support", Some(4)))
        );
    }

    #[test]
    fn test_converse_params_empty_without_settings() {
        let cli = parse(&["converse-bridge", "chat", "--messages", "m.json"]);
        let Some(Command::Chat(args)) = cli.command else {
            panic!("expected chat command");
        };
        assert_eq!(
            args.invocation.converse_params(ConverseParams::default()),
            ConverseParams::default()
        );
    }

    #[test]
    fn test_additional_fields_merge_over_config() {
        let cli = parse(&[
            "converse-bridge",
            "chat",
            "--messages",
            "m.json",
            "--additional-fields",
            r#"{"top_k": 10, "reasoning": true}"#,
        ]);
        let Some(Command::Chat(args)) = cli.command else {
            panic!("expected chat command");
        };

        let mut configured = Map::new();
        configured.insert("top_k".to_string(), json!(40));
        configured.insert("top_a".to_string(), json!(0.5));
        let defaults = ConverseParams::default().with_additional_fields(configured);

        let fields = args
            .invocation
            .converse_params(defaults)
            .additional_model_request_fields
            .unwrap();
        assert_eq!(fields["top_k"], 10);
        assert_eq!(fields["top_a"], 0.5);
        assert_eq!(fields["reasoning"], true);
    }

    #[test]
    fn test_additional_fields_must_be_object() {
        let result = Cli::try_parse_from([
            "converse-bridge",
            "chat",
            "--messages",
            "m.json",
            "--additional-fields",
            "[1, 2]",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_guardrail_flags() {
        let cli = parse(&[
            "converse-bridge",
            "chat",
            "--messages",
            "m.json",
            "--guardrail-id",
            "gr-cli",
            "--guardrail-trace",
            "enabled",
        ]);
        let Some(Command::Chat(args)) = cli.command else {
            panic!("expected chat command");
        };

        let configured = ConverseParams::default().with_guardrail(GuardrailConfig {
            guardrail_identifier: "gr-config".to_string(),
            guardrail_version: "2".to_string(),
            trace: None,
        });
        let guardrail = args
            .invocation
            .converse_params(configured)
            .guardrail_config
            .unwrap();
        assert_eq!(guardrail.guardrail_identifier, "gr-cli");
        assert_eq!(guardrail.guardrail_version, "DRAFT");
        assert_eq!(guardrail.trace.as_deref(), Some("enabled"));
    }

    #[test]
    fn test_guardrail_trace_applies_to_configured_guardrail() {
        let cli = parse(&[
            "converse-bridge",
            "chat",
            "--messages",
            "m.json",
            "--guardrail-trace",
            "disabled",
        ]);
        let Some(Command::Chat(args)) = cli.command else {
            panic!("expected chat command");
        };

        let configured = ConverseParams::default().with_guardrail(GuardrailConfig {
            guardrail_identifier: "gr-config".to_string(),
            guardrail_version: "2".to_string(),
            trace: Some("enabled".to_string()),
        });
        let guardrail = args
            .invocation
            .converse_params(configured)
            .guardrail_config
            .unwrap();
        assert_eq!(guardrail.guardrail_identifier, "gr-config");
        assert_eq!(guardrail.trace.as_deref(), Some("disabled"));

        assert!(
            args.invocation
                .converse_params(ConverseParams::default())
                .guardrail_config
                .is_none()
        );
    }

    #[test]
    fn test_guardrail_version_requires_id() {
        let result = Cli::try_parse_from([
            "converse-bridge",
            "chat",
            "--messages",
            "m.json",
            "--guardrail-version",
            "1",
        ]);
        assert!(result.is_err());
    }
}
