//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build `run` commands with a handful of overrides and
//! assert error handling behaviour. These helpers keep the cases concise.

use super::commands::run_command;
use super::{
    AlgorithmChoice, Cli, CliError, Command, FringeChoice, RunCommand, RunReport, render_report,
    run_cli,
};

pub(super) fn run_args(points: usize, seed: i64, algorithm: AlgorithmChoice) -> RunCommand {
    RunCommand {
        points,
        seed,
        algorithm,
        shuffle_seed: None,
        verbose_limit: 10,
        fringe: FringeChoice::Batched,
    }
}

pub(super) fn cli_for(command: RunCommand) -> Cli {
    Cli {
        command: Command::Run(command),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn rendered(command: RunCommand) -> Result<String, Box<dyn std::error::Error>> {
    report_text(&run_command(command)?)
}

pub(super) fn report_text(report: &RunReport) -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    render_report(report, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
