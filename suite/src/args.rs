use reqwest::Url;
use std::path::PathBuf;
use structopt::StructOpt;

/// wbsuite checks a workbench deployment end to end.
#[derive(Debug, StructOpt)]
#[structopt(
    global_settings = &[
        structopt::clap::AppSettings::ColoredHelp,
        structopt::clap::AppSettings::InferSubcommands,
    ]
)]
pub struct Args {
    #[structopt(long = "config-file", parse(from_os_str))]
    /// Path to the configuration file. Typically defaults to
    /// ~/.config/workbench-suite/config.json on Linux.
    pub config: Option<PathBuf>,

    #[structopt(short = "v", long = "verbose")]
    /// Enable more verbose logging.
    pub verbose: bool,

    #[structopt(long = "endpoint", parse(try_from_str))]
    /// Base URL of the deployment. Overrides the configuration file.
    pub endpoint: Option<Url>,

    #[structopt(long = "token")]
    /// API token to use. Overrides the configuration file.
    pub token: Option<String>,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    #[structopt(name = "config")]
    /// Print the effective configuration, with the token redacted
    Config,

    #[structopt(name = "ping")]
    /// Check the deployment answers at all
    Ping,

    #[structopt(name = "smoke")]
    /// Run a namespace, project and folder lifecycle and clean up after it
    Smoke,
}
