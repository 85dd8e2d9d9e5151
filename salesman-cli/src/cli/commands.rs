//! Command implementations and argument parsing for the salesman CLI.

use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use salesman_core::{
    Algorithm, ExactSolver, FringePolicy, SolveOptions, SolverOutcome, TspError, WeightedGraph,
    solve,
};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

/// Largest point count the exact solver accepts; it measures `(n - 1)!` tours.
pub const EXACT_POINT_LIMIT: usize = 13;

/// Largest point count for which the exact solver logs every candidate tour.
const EXACT_TRACE_LIMIT: usize = 5;

const DEFAULT_VERBOSE_LIMIT: usize = 10;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "salesman",
    about = "Solve random Euclidean travelling salesman instances."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a point set and run one or more solvers over it.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of points to place.
    pub points: usize,

    /// Seed for point placement; negative values are accepted.
    #[arg(allow_negative_numbers = true)]
    pub seed: i64,

    /// Solver to run.
    #[arg(long, value_enum, default_value_t = AlgorithmChoice::All)]
    pub algorithm: AlgorithmChoice,

    /// Seed for the greedy solver's edge shuffle (defaults to the point seed).
    #[arg(long = "shuffle-seed")]
    pub shuffle_seed: Option<u64>,

    /// Print coordinates, matrices and tables only up to this many points.
    #[arg(
        long = "verbose-limit",
        default_value_t = DEFAULT_VERBOSE_LIMIT,
        value_parser = clap::value_parser!(usize),
    )]
    pub verbose_limit: usize,

    /// How the MST solver keeps its fringe ordered.
    #[arg(long, value_enum, default_value_t = FringeChoice::Batched)]
    pub fringe: FringeChoice,
}

/// Solver selection on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum AlgorithmChoice {
    /// Exhaustive search.
    Exact,
    /// Minimum spanning tree walk.
    Mst,
    /// Greedy edge selection.
    Greedy,
    /// Bitonic dynamic program.
    Bitonic,
    /// Every solver in turn.
    All,
}

impl AlgorithmChoice {
    /// Returns the solvers this choice runs, in reporting order.
    #[must_use]
    pub fn algorithms(self) -> Vec<Algorithm> {
        match self {
            Self::Exact => vec![Algorithm::Exact],
            Self::Mst => vec![Algorithm::Mst],
            Self::Greedy => vec![Algorithm::Greedy],
            Self::Bitonic => vec![Algorithm::Bitonic],
            Self::All => Algorithm::ALL.to_vec(),
        }
    }
}

/// Fringe maintenance selection on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum FringeChoice {
    /// Rebuild the heap once per extracted vertex.
    Batched,
    /// Swim each improved vertex immediately.
    DecreaseKey,
}

impl From<FringeChoice> for FringePolicy {
    fn from(choice: FringeChoice) -> Self {
        match choice {
            FringeChoice::Batched => Self::BatchedHeapify,
            FringeChoice::DecreaseKey => Self::DecreaseKey,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// At least one point is required.
    #[error("point count must be at least 1, got {points}")]
    InvalidPointCount {
        /// Requested point count.
        points: usize,
    },
    /// The exact solver was selected for too many points.
    #[error("exact solver supports at most {limit} points, got {requested}")]
    ExactLimitExceeded {
        /// Requested point count.
        requested: usize,
        /// Largest accepted point count.
        limit: usize,
    },
    /// A solver failed.
    #[error(transparent)]
    Core(#[from] TspError),
}

/// One solver's outcome and how long it took.
#[derive(Debug, Clone)]
pub struct SolverRun {
    /// What the solver produced.
    pub outcome: SolverOutcome,
    /// Wall-clock time spent in the solver.
    pub elapsed: Duration,
}

/// Everything the `run` command computed.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Seed the points were placed with.
    pub seed: i64,
    /// Seed the greedy solver shuffled with.
    pub shuffle_seed: u64,
    /// The generated instance.
    pub graph: WeightedGraph,
    /// Detail threshold for rendering.
    pub verbose_limit: usize,
    /// Solver results in execution order.
    pub runs: Vec<SolverRun>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when validation or a solver fails.
///
/// # Examples
/// ```
/// # use salesman_cli::cli::{AlgorithmChoice, Cli, Command, FringeChoice, RunCommand, run_cli};
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         points: 6,
///         seed: 3,
///         algorithm: AlgorithmChoice::All,
///         shuffle_seed: None,
///         verbose_limit: 10,
///         fringe: FringeChoice::Batched,
///     }),
/// };
/// let report = run_cli(cli)?;
/// assert_eq!(report.runs.len(), 4);
/// assert_eq!(report.shuffle_seed, 3);
/// # Ok::<(), salesman_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<RunReport, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(points = command.points, seed = command.seed, algorithm = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<RunReport, CliError> {
    let algorithms = command.algorithm.algorithms();
    validate(command.points, &algorithms)?;
    Span::current().record("algorithm", field::debug(command.algorithm));

    let rng_seed = command.seed.cast_unsigned();
    let graph = WeightedGraph::generate(command.points, rng_seed)?;
    let options = SolveOptions {
        shuffle_seed: command.shuffle_seed.unwrap_or(rng_seed),
        fringe_policy: command.fringe.into(),
    };

    let runs = algorithms
        .into_iter()
        .map(|algorithm| run_solver(algorithm, &graph, &options))
        .collect::<Result<Vec<_>, _>>()?;

    info!(solvers = runs.len(), "command completed");
    Ok(RunReport {
        seed: command.seed,
        shuffle_seed: options.shuffle_seed,
        graph,
        verbose_limit: command.verbose_limit,
        runs,
    })
}

pub(super) fn validate(points: usize, algorithms: &[Algorithm]) -> Result<(), CliError> {
    if points == 0 {
        return Err(CliError::InvalidPointCount { points });
    }
    if points > EXACT_POINT_LIMIT && algorithms.contains(&Algorithm::Exact) {
        return Err(CliError::ExactLimitExceeded {
            requested: points,
            limit: EXACT_POINT_LIMIT,
        });
    }
    Ok(())
}

#[instrument(name = "cli.solve", err, skip(graph, options))]
fn run_solver(
    algorithm: Algorithm,
    graph: &WeightedGraph,
    options: &SolveOptions,
) -> Result<SolverRun, CliError> {
    let started = Instant::now();
    let outcome = if algorithm == Algorithm::Exact && graph.vertex_count() <= EXACT_TRACE_LIMIT {
        SolverOutcome::Exact(ExactSolver.solve_with_trace(graph, |path, distance| {
            debug!(path = ?path, %distance, "candidate tour");
        }))
    } else {
        solve(algorithm, graph, options)?
    };
    let elapsed = started.elapsed();
    info!(
        %algorithm,
        distance = %outcome.tour().distance(),
        elapsed_ms = elapsed.as_millis() as u64,
        "solver finished"
    );
    Ok(SolverRun { outcome, elapsed })
}
