//! CLI entrypoint for converse-bridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use bridge_application::{
    BridgeContext, ConverseChatInput, ConverseToolUseInput, NoTelemetry, TelemetryReporter,
};
use bridge_infrastructure::{
    AwsSecretStore, BedrockConverseGateway, ConfigLoader, FileConfig, HttpImageFetcher,
    JsonlTelemetryReporter, TelemetrySink, TracingTelemetryReporter,
};
use bridge_presentation::{
    ChatArgs, Cli, Command, ConsoleFormatter, InvocationArgs, Rendered, ToolUseArgs,
    parse_metadata, read_messages, read_tools,
};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Use `chat` or `tool-use` (see --help).");
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        eprintln!("{}", ConsoleFormatter::config_warning(&issue.message));
    }

    info!("Starting converse-bridge");

    // === Dependency Injection ===
    let context = build_context(&config).await?;

    let rendered = match command {
        Command::Chat(args) => run_chat(&context, &config, args).await?,
        Command::ToolUse(args) => run_tool_use(&context, &config, args).await?,
    };

    rendered.print();
    Ok(if rendered.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize logging based on verbosity level, optionally teeing to a rolling file
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    // stdout carries results, so console logs go to stderr
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(EnvFilter::new(level))
            .with(console)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "converse-bridge.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(Some(guard))
}

async fn build_context(config: &FileConfig) -> Result<BridgeContext> {
    let profile = config.bedrock.profile.as_deref();
    let gateway = BedrockConverseGateway::connect(&config.bedrock.region, profile).await;

    let mut fetcher = HttpImageFetcher::default().with_max_bytes(config.images.max_bytes);
    if let Some(ref user_agent) = config.images.user_agent {
        fetcher = fetcher.with_user_agent(user_agent);
    }

    let context = BridgeContext::new(
        Arc::new(gateway),
        Arc::new(fetcher),
        telemetry_reporter(config),
    );

    match config.secrets.startup_secret() {
        Some(name) => {
            let store = AwsSecretStore::connect(&config.secrets.region, profile).await;
            context
                .with_secret_from(&store, name)
                .await
                .context("Failed to load startup secret")
        }
        None => Ok(context),
    }
}

fn telemetry_reporter(config: &FileConfig) -> Arc<dyn TelemetryReporter> {
    match config.telemetry.sink {
        TelemetrySink::Tracing => Arc::new(TracingTelemetryReporter),
        TelemetrySink::None => Arc::new(NoTelemetry),
        TelemetrySink::Jsonl => {
            match config
                .telemetry
                .jsonl_path
                .as_deref()
                .and_then(JsonlTelemetryReporter::new)
            {
                Some(reporter) => {
                    info!(path = %reporter.path().display(), "Writing observations");
                    Arc::new(reporter)
                }
                None => {
                    warn!("JSONL telemetry unavailable, observations will be discarded");
                    Arc::new(NoTelemetry)
                }
            }
        }
    }
}

fn model_id(invocation: &InvocationArgs, config: &FileConfig) -> String {
    invocation
        .model_id
        .clone()
        .unwrap_or_else(|| config.bedrock.model_id.clone())
}

async fn run_chat(
    context: &BridgeContext,
    config: &FileConfig,
    args: ChatArgs,
) -> Result<Rendered> {
    let invocation = args.invocation;
    let model_id = model_id(&invocation, config);

    let messages = read_messages(&invocation.messages)?;

    let mut input = ConverseChatInput::new(messages.parsed)
        .with_raw_messages(messages.raw)
        .with_model_id(&model_id)
        .with_metadata(parse_metadata(invocation.metadata.as_deref())?)
        .with_params(invocation.converse_params(config.converse_params()));
    if let Some(prompt) = invocation.prompt() {
        input = input.with_prompt(prompt);
    }

    let outcome = context.chat().execute(input).await?;
    Ok(ConsoleFormatter::chat(&model_id, &outcome))
}

async fn run_tool_use(
    context: &BridgeContext,
    config: &FileConfig,
    args: ToolUseArgs,
) -> Result<Rendered> {
    let invocation = args.invocation;
    let model_id = model_id(&invocation, config);

    let messages = read_messages(&invocation.messages)?;
    let tools = read_tools(&args.tools)?;

    let mut input = ConverseToolUseInput::new(messages.parsed, tools.parsed)
        .with_raw_messages(messages.raw)
        .with_raw_tools(tools.raw)
        .with_tool_choice(args.tool_choice)
        .with_model_id(&model_id)
        .with_metadata(parse_metadata(invocation.metadata.as_deref())?)
        .with_params(invocation.converse_params(config.converse_params()));
    if let Some(prompt) = invocation.prompt() {
        input = input.with_prompt(prompt);
    }

    let outcome = context.tool_use().execute(input).await?;
    Ok(ConsoleFormatter::tool_calls(&model_id, &outcome))
}
