//! Confbind CLI entry point.

use clap::Parser;

use confbind::cli::{commands, handle_error, Cli, Commands};
use confbind::infrastructure::config::SettingsLoader;
use confbind::infrastructure::logging::Logger;

fn main() {
    let cli = Cli::parse();

    let settings = match cli.settings.as_deref() {
        Some(path) => SettingsLoader::load_with(Some(path)),
        None => SettingsLoader::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => handle_error(&err, cli.json),
    };

    let _logger = match Logger::init(&settings.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(&err, cli.json),
    };

    let result = match &cli.command {
        Commands::Check(args) => commands::check::execute(args, settings, cli.json),
        Commands::ShowSettings => commands::settings::execute(settings, cli.json),
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
