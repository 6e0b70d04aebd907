use std::process::ExitCode;

use clap::Parser;
use formulir_form::Catalog;

mod cli;
mod commands;
mod config;

use cli::{Cli, Command};
use config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref())?;

    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    if let Some(format) = cli.log_format {
        config.log.format = format.into();
    }
    let _guard = formulir_log::init_with(config.log)?;

    match cli.command {
        Command::Submit { file, check_email } => {
            let report = commands::submit::run(&file, config.form, check_email).await?;
            if report.is_submitted() {
                println!("{report}");
                Ok(ExitCode::SUCCESS)
            } else {
                eprint!("{report}");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Catalog { json } => {
            print!("{}", commands::catalog::render(&Catalog::builtin(), json)?);
            if json {
                println!();
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
