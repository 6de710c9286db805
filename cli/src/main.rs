use clap::Parser;
use host::ConsoleHost;
use lapse_core::NoteExpiry;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing_subscriber::EnvFilter;

mod commands;
mod host;

/// Removes notes from a folder once they pass a configurable age.
///
/// Without a subcommand, behaves like the host finishing startup: runs the
/// cleanup once.
#[derive(Parser, Debug)]
#[command(name = "lapse", version, about)]
struct Cli {
    /// Root directory of the notes vault.
    #[arg(long, env = "LAPSE_VAULT", default_value = ".")]
    vault: PathBuf,

    /// Settings file. Defaults to `<vault>/.lapse/settings.toml`.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<commands::Command>,
}

/// `RUST_LOG` wins when it parses; otherwise `--verbose` picks the level.
fn env_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(filter) = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return filter;
    }

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    EnvFilter::default().add_directive(default_level.into())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref(), cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let settings_path = cli
        .settings
        .unwrap_or_else(|| ConsoleHost::default_settings_path(&cli.vault));
    let feature = NoteExpiry::load(ConsoleHost::new(&cli.vault, settings_path))?;
    let now = SystemTime::now();

    match cli.command {
        Some(command) => command.run(&feature, now),
        None => {
            feature.on_ready(now)?;
            Ok(())
        }
    }
}
