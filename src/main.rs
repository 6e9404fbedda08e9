use std::io;
use std::process::ExitCode;
use tracing::{debug, error};

use craps_table::{logging, Result, TableConfig};

mod app_config;
mod commands;

use app_config::{Cli, Commands};
use commands::SimulateOptions;

fn main() -> ExitCode {
    use clap::Parser;

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("craps-table: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = TableConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    logging::init(level, cli.json_logs)?;
    debug!(command = cli.command.name(), "starting");

    match cli.command {
        Commands::Play => commands::play(&config),

        Commands::Simulate {
            bets,
            rolls,
            random_rolls,
            seed,
            json,
        } => {
            let options = SimulateOptions {
                bets: &bets,
                rolls: &rolls,
                random_rolls,
                seed,
                json,
            };
            commands::simulate(&config, &options, &mut io::stdout().lock())
        }

        Commands::Rules => commands::rules(&mut io::stdout().lock()),
    }
}
