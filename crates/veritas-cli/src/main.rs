//! Veritas CLI - cross-source claim comparison and event clustering.

use clap::Parser;
use veritas_cli::commands;
use veritas_cli::{logging, Cli, Command, Config, Formatter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> veritas_cli::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Compare(args) => commands::execute_compare(args, &config, &formatter),
        Command::Config => commands::execute_config(&config),
    }
}
