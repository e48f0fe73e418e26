use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod logging;

fn main() -> anyhow::Result<ExitCode> {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(cli::parse_error_status(&err).into());
        }
    };
    logging::init(cli.verbose, !cli.no_color)?;
    Ok(commands::run_command(cli)?.into())
}
