mod cli;
mod error;
mod fmt;
mod grid;
mod logging;
mod models;
mod settings;
mod source;
mod tui;
mod window;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();
    logging::init(&settings::load_settings());

    let result = match cli.command {
        None => cli::dashboard::run(&cli.view),
        Some(Commands::Show { view }) => cli::show::run(&view),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetEndpoint { url } => cli::config::set_endpoint(&url),
            ConfigCommands::Reset => cli::config::reset(),
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
