use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use pagesmith::cli::{Cli, Command};

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    pagesmith::logging::init("info").context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let storage = pagesmith::config::open_storage(pagesmith::config::data_dir(cli.data_dir));

    match cli.command {
        Command::Page { command } => pagesmith::commands::page(storage, command).context("page")?,
        Command::Block { command } => {
            pagesmith::commands::block(storage, command).context("block")?;
        }
        Command::User { command } => pagesmith::commands::user(storage, command).context("user")?,
        Command::Settings { command } => {
            pagesmith::commands::settings(storage, command).context("settings")?;
        }
        Command::Media { command } => {
            pagesmith::commands::media(storage, command).context("media")?;
        }
    }

    Ok(())
}
