//! Chat alerts - highlight and sound alerts for game chat messages.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chat_alerts::alert::Rule;
use chat_alerts::chat::{Channel, ChatMessage, Payload, RichText, ScanPass};
use chat_alerts::cli::{read_messages, InboundMessage};
use chat_alerts::config::{AlertsConfig, ColorLookup, ConfigError, ConfigLoader, RuleStore};
use chat_alerts::display;
use chat_alerts::sound::{AudioBackend, BellSoundPlayer, BuiltinSound, NullBackend, RodioBackend};
use chat_alerts::watcher::ChatWatcher;

#[derive(Parser)]
#[command(
    name = "chat-alerts",
    about = "Highlight and sound alerts for chat messages",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the default search paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Do not ring the terminal bell for built-in sounds.
    #[arg(long, global = true)]
    no_bell: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each rule's readiness and the watched channels.
    Check,
    /// Run a single message through the alert rules.
    Scan {
        /// Channel the message arrived on.
        #[arg(short = 'C', long, default_value_t = Channel::Say)]
        channel: Channel,
        /// Sender name.
        #[arg(short, long, default_value = "")]
        sender: String,
        /// Scan in the pre-display filter pass.
        #[arg(long)]
        pre_filter: bool,
        /// Message text.
        text: String,
    },
    /// Process a JSON-lines message stream.
    Watch {
        /// Read messages from this file instead of stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Print rewritten messages as JSON lines.
        #[arg(long)]
        json: bool,
    },
    /// Write a config file with a sample rule.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Config file already exists at {0} (use --force to overwrite)")]
    ConfigExists(PathBuf),
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn loader(cli: &Cli) -> ConfigLoader {
    cli.config
        .clone()
        .map_or_else(ConfigLoader::new, ConfigLoader::with_path)
}

fn audio_backend() -> Box<dyn AudioBackend> {
    match RodioBackend::open_default() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            tracing::warn!(error = %e, "Custom sounds disabled");
            Box::new(NullBackend)
        }
    }
}

fn build_watcher(config: AlertsConfig, no_bell: bool) -> ChatWatcher {
    ChatWatcher::new(
        config,
        audio_backend(),
        Box::new(BellSoundPlayer { quiet: no_bell }),
    )
}

fn sample_rule() -> Rule {
    let mut rule = Rule::new("Raid call");
    rule.pattern = "raid".to_string();
    rule.play_sound = true;
    rule.builtin_sound = BuiltinSound::Sound03;
    rule
}

async fn watch_stream<R>(
    reader: R,
    watcher: &mut ChatWatcher,
    colors: &dyn ColorLookup,
    json: bool,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
{
    let stream = read_messages(reader);
    tokio::pin!(stream);

    while let Some(item) = stream.next().await {
        let mut inbound: InboundMessage = match item {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed message");
                continue;
            }
        };
        let pass = inbound.pass();
        let outcome = watcher.handle_message(&mut inbound.message, pass);
        if json {
            println!("{}", serde_json::to_string(&inbound)?);
        } else {
            display::print_message(&inbound.message, &outcome, colors);
            display::print_alert(watcher.rules(), &outcome);
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loader = loader(&cli);

    match cli.command {
        Commands::Check => {
            match loader.find_config_file() {
                Some(path) => tracing::info!(path = %path.display(), "Using config file"),
                None => tracing::info!("No config file found"),
            }
            let watcher = build_watcher(loader.load_config()?, cli.no_bell);
            for (position, rule) in watcher.rules().iter().enumerate() {
                display::print_rule_status(position, rule);
            }
            display::print_watched(watcher.index());
        }
        Commands::Scan {
            channel,
            sender,
            pre_filter,
            text,
        } => {
            let config = loader.load_config()?;
            let palette = config.palette();
            let mut watcher = build_watcher(config, cli.no_bell);

            let mut message = ChatMessage {
                channel,
                sender: RichText::plain(sender),
                body: RichText::from(vec![Payload::text(text)]),
            };
            let pass = ScanPass::from_pre_filter(pre_filter);
            let outcome = watcher.handle_message(&mut message, pass);
            display::print_message(&message, &outcome, &palette);
            display::print_alert(watcher.rules(), &outcome);
        }
        Commands::Watch { input, json } => {
            let config = loader.load_config()?;
            let palette = config.palette();
            let mut watcher = build_watcher(config, cli.no_bell);

            match input {
                Some(path) => {
                    let file = tokio::fs::File::open(&path)
                        .await
                        .map_err(|source| CliError::Input { path, source })?;
                    watch_stream(BufReader::new(file), &mut watcher, &palette, json).await?;
                }
                None => {
                    let stdin = BufReader::new(tokio::io::stdin());
                    watch_stream(stdin, &mut watcher, &palette, json).await?;
                }
            }
            watcher.release_all();
        }
        Commands::Init { force } => {
            if let Some(path) = loader.find_config_file() {
                if !force {
                    return Err(CliError::ConfigExists(path));
                }
            }
            loader.save(&[sample_rule()])?;
            if let Some(path) = loader.save_path() {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "chat-alerts failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
