//! Command-line interface orchestration for the salesman solvers.
//!
//! The CLI offers a single `run` command that places a seeded random point
//! set, runs the selected solvers over it and renders a plain-text report.

mod commands;
mod report;

pub use commands::{
    AlgorithmChoice, Cli, CliError, Command, EXACT_POINT_LIMIT, FringeChoice, RunCommand,
    RunReport, SolverRun, run_cli,
};
pub use report::render_report;

#[cfg(test)]
mod test_helpers;
