use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "formulir", version, about = "Validate and submit registration forms")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file; `formulir.toml` in the working directory when omitted
    #[arg(long, global = true, env = "FORMULIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `warn,formulir_form=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a JSON form snapshot (or a list of edits) and submit it
    Submit {
        /// `FormValues`-shaped object, or `[{"field": .., "value": ..}]`
        file: PathBuf,

        /// Run the email availability check before submitting
        #[arg(long)]
        check_email: bool,
    },
    /// Print the jobs, hobbies and genders the form accepts
    Catalog {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormat> for formulir_log::Format {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}
