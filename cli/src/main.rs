//! CLI entrypoint for chain-of-draft
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use cod_application::{
    ConversationLogger, ExecutionParams, NoConversationLogger, RunChatInput, RunChatUseCase,
};
use cod_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, ProxyLlmGateway, ProxySettings,
    expand_home,
};
use cod_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ProgressMode, ReplConfig, run_turn,
    set_color_enabled,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // Held until exit so buffered log lines reach the file.
    let _log_guard = init_logging(
        cli.verbose,
        file_config.logging.file.as_deref().map(expand_home).as_deref(),
    );

    info!("Starting chain-of-draft");

    let issues = file_config.validate();
    for issue in &issues {
        warn!("config: {}", issue.message);
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration, see the messages above.");
    }

    let config = cli.apply_overrides(file_config.to_session_config());
    let output = output_config(&cli, &file_config);
    set_color_enabled(output.color);

    // === Dependency Injection ===
    let proxy = &file_config.proxy;
    let gateway = Arc::new(ProxyLlmGateway::new(ProxySettings {
        endpoint: proxy.endpoint.clone(),
        timeout: proxy.timeout(),
        max_retries: proxy.max_retries,
        retry_backoff: proxy.retry_backoff(),
        api_key: proxy.resolve_api_key(),
        max_temperature: proxy.max_temperature,
    })?);
    info!("Using proxy endpoint {}", gateway.endpoint());

    // The application timeout covers every retry the gateway may make.
    let execution = ExecutionParams::default().with_request_timeout(Some(proxy.call_budget()));
    let conversation_logger = conversation_logger(&file_config);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(gateway, config)
            .with_execution_params(execution)
            .with_conversation_logger(conversation_logger)
            .with_output(output)
            .with_repl_config(ReplConfig {
                show_progress: file_config.repl.show_progress && !cli.quiet,
                history_file: file_config.repl.history_path(),
            });

        repl.run().await?;
        return Ok(());
    }

    // Single query mode - query is required
    let query = match cli.query.clone() {
        Some(q) => q,
        None => bail!("A query is required. Use --chat for interactive mode."),
    };

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    let use_case = RunChatUseCase::new(gateway)
        .with_execution_params(execution)
        .with_conversation_logger(conversation_logger)
        .with_cancellation(token);

    let outcome = run_turn(
        &use_case,
        RunChatInput::new(query.clone(), config),
        ProgressMode::detect(!cli.quiet),
    )
    .await?;

    let formatter = ConsoleFormatter::new(&output);
    println!("{}", formatter.render(&query, &outcome, output.format));

    Ok(())
}

/// Install the tracing subscriber.
///
/// `-v` flags win over `RUST_LOG`; without either only warnings are shown.
/// When `log_file` is set, events are also appended there through a
/// non-blocking writer whose guard is returned.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file.and_then(split_log_path) {
        Some((dir, name)) => {
            let _ = std::fs::create_dir_all(&dir);
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn split_log_path(path: &Path) -> Option<(PathBuf, PathBuf)> {
    let name = PathBuf::from(path.file_name()?);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, name))
}

fn output_config(cli: &Cli, file_config: &FileConfig) -> OutputConfig {
    let file = &file_config.output;
    OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(file.format)
            .unwrap_or_default(),
        color: file.color,
        show_thinking: file.show_thinking,
        show_stats: file.show_stats,
    }
}

fn conversation_logger(file_config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = file_config.logging.conversation_log.as_deref() else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::open(expand_home(path)) {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => {
            warn!("Could not open conversation log {}", path);
            Arc::new(NoConversationLogger)
        }
    }
}
