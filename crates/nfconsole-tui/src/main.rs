//! `nfconsole-tui`: full-screen terminal console for a mobile-core
//! configuration service.
//!
//! Built on [ratatui](https://ratatui.rs). Sections (device groups, network
//! slices, gNB and UPF inventory, K4 keys, subscribers) are reachable with
//! number keys 1-6; each shows a list, a detail view and a create/edit form.
//!
//! Logs go to a file (default under the user cache directory) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, bail};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use nfconsole_config::{Profile, load_config, profile_to_console_config};
use nfconsole_core::{Console, ConsoleConfig};

use crate::app::App;

/// Terminal console for mobile-core network configuration.
#[derive(Parser, Debug)]
#[command(name = "nfconsole-tui", version, about)]
struct Cli {
    /// Configuration profile to use
    #[arg(short = 'p', long, env = "NFCONSOLE_PROFILE")]
    profile: Option<String>,

    /// Server URL, overriding the profile's
    #[arg(short = 's', long, env = "NFCONSOLE_SERVER")]
    server: Option<String>,

    /// Log file path (defaults to nfconsole-tui.log in the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_log_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "nfconsole")
        .map_or_else(std::env::temp_dir, |dirs| dirs.cache_dir().to_path_buf())
        .join("nfconsole-tui.log")
}

/// File-based tracing; stdout/stderr belong to the UI. The returned guard
/// must live until exit so buffered lines are flushed.
fn setup_tracing(cli: &Cli) -> Result<WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nfconsole_tui={level},nfconsole_core={level},nfconsole_api={level}")));

    let log_file = cli.log_file.clone().unwrap_or_else(default_log_file);
    let log_dir = log_file.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(log_dir)?;
    let file_name = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("nfconsole-tui.log"));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, file_name));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .init();

    Ok(guard)
}

/// Resolve the connection: `--server` over the selected profile, the
/// profile from `--profile` or the config's default.
fn resolve_console_config(cli: &Cli) -> Result<ConsoleConfig> {
    let cfg = load_config()?;
    let name = cli
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    let profile = match (cfg.profiles.get(&name), &cli.server) {
        (Some(profile), Some(server)) => Profile {
            server: server.clone(),
            ..profile.clone()
        },
        (None, Some(server)) => Profile::new(server.clone()),
        (Some(profile), None) => profile.clone(),
        (None, None) if cli.profile.is_some() => {
            bail!("profile '{name}' not found; create it with `nfconsole config init`")
        }
        (None, None) => bail!("no server configured; run `nfconsole config init` or pass --server"),
    };

    Ok(profile_to_console_config(&profile, &cfg.defaults)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first so startup failures print on a restored terminal.
    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli)?;

    let config = resolve_console_config(&cli)?;
    info!(server = %config.server, "starting nfconsole-tui");

    let console = Console::from_config(&config)?.spawn();
    let mut app = App::new(console, config.server.to_string());
    app.run().await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["nfconsole-tui", "-vv", "--server", "http://core.lab:5000"]);
        assert!(cli.is_ok_and(|c| c.verbose == 2 && c.server.as_deref() == Some("http://core.lab:5000")));
    }
}
