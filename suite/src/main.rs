#![deny(clippy::all)]

mod args;
mod io;

use anyhow::{Context, Result};
use colored::Colorize;
use log::error;
use std::process;
use structopt::StructOpt;
use workbench_suite::{
    config::{self, SuiteConfig},
    context::TestContext,
    smoke::{self, Step},
};

use crate::{
    args::{Args, Command},
    io::init_env_logger,
};

fn effective_config(args: &Args) -> Result<SuiteConfig> {
    let mut config = config::load(args.config.as_deref())?;
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(token) = &args.token {
        config.token = Some(token.clone());
    }
    Ok(config)
}

fn print_step(step: &Step) {
    let status = step
        .status_code
        .map(|status| status.as_u16().to_string())
        .unwrap_or_else(|| "---".to_owned());
    let marker = if step.passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!("{} {} {}", marker, status.dimmed(), step.name);
    if let Some(message) = &step.message {
        println!("     {message}");
    }
}

/// Exit non-zero when any step failed.
fn report(steps: &[Step]) -> bool {
    steps.iter().for_each(print_step);
    let failed = steps.iter().filter(|step| !step.passed).count();
    if failed == 0 {
        println!("{}", format!("{} steps passed", steps.len()).green());
        true
    } else {
        println!("{}", format!("{failed} of {} steps failed", steps.len()).red());
        false
    }
}

fn run(args: Args) -> Result<bool> {
    let config = effective_config(&args)?;

    match args.command {
        Command::Config => {
            let redacted = serde_json::to_string_pretty(&config.redacted())
                .context("Could not serialise configuration")?;
            println!("{redacted}");
            Ok(true)
        }
        Command::Ping => {
            let context = TestContext::new(config)?;
            Ok(report(&[smoke::ping(context.client())]))
        }
        Command::Smoke => {
            let context = TestContext::new(config)?;
            let steps = smoke::run(context.client(), context.settle_delay())?;
            Ok(report(&steps))
        }
    }
}

fn main() {
    let args = Args::from_args();
    init_env_logger(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            error!("An error occurred:");
            for cause in error.chain() {
                error!(" |- {cause}");
            }
            process::exit(1);
        }
    }
}
