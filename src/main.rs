mod cli;
mod cmd;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use std::process;
use tracing_subscriber::EnvFilter;

use vitalboard::output;

/// Log to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("VITALBOARD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "vitalboard=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (name, result) = match cli.command {
        Commands::Init { force } => ("init", cmd::init::run(force)),
        Commands::Dashboard {
            source,
            activity,
            custom,
            remove,
            simulate,
        } => (
            "dashboard",
            cmd::dashboard::run(cmd::dashboard::DashboardArgs {
                source,
                activity,
                custom,
                remove,
                simulate,
                human: cli.human,
            }),
        ),
        Commands::Thresholds { activity } => (
            "thresholds",
            cmd::thresholds::run(activity.as_deref(), cli.human),
        ),
        Commands::Watch {
            source,
            interval,
            simulate,
        } => (
            "watch",
            cmd::watch::run(source, interval, simulate, cli.human),
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => ("config", cmd::config::run_show(cli.human)),
            ConfigAction::Set { key, value } => ("config", cmd::config::run_set(&key, &value)),
        },
        Commands::Completions { shell } => ("completions", cmd::completions::run(shell)),
    };

    if let Err(e) = result {
        tracing::debug!(command = name, error = ?e, "command failed");
        let err = output::error(name, "general_error", &format!("{:#}", e));
        eprintln!("{}", err);
        process::exit(1);
    }
}
