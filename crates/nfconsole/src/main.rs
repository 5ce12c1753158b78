mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nfconsole_core::{Console, ResourceKind};

use crate::cli::{Cli, Command, ResourceCommand};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let (kind, args) = match cli.command {
        // Config commands don't need a server
        Command::Config(args) => return commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "nfconsole", &mut std::io::stdout());
            return Ok(());
        }

        Command::DeviceGroups(args) => (ResourceKind::DeviceGroup, args),
        Command::Slices(args) => (ResourceKind::NetworkSlice, args),
        Command::Gnbs(args) => (ResourceKind::Gnb, args),
        Command::Upfs(args) => (ResourceKind::Upf, args),
        Command::K4Keys(args) => (ResourceKind::K4Key, args),
        Command::Subscribers(args) => (ResourceKind::Subscriber, args),
    };

    // Field descriptions are local
    if matches!(args.command, ResourceCommand::Fields) {
        commands::resource::fields(kind, &cli.global);
        return Ok(());
    }

    let console_config = config::resolve_console_config(&cli.global)?;
    tracing::debug!(server = %console_config.server, %kind, "dispatching command");
    let mut console = Console::from_config(&console_config)?;
    commands::resource::handle(kind, args, &mut console, &cli.global).await
}
