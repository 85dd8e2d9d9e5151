//! Plain-text rendering of a [`RunReport`].

use std::io::{self, Write};

use salesman_core::{
    BitonicSolution, Distance, DpTable, ExactSolution, GreedySolution, MstSolution, Solution,
    SolverOutcome, WeightedGraph,
};

use super::commands::{RunReport, SolverRun};

/// Renders `report` to `writer` in a human-readable text format.
///
/// Coordinates, matrices and tables are only written when the instance has at
/// most `verbose_limit` points; tours, distances and runtimes always are.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use salesman_cli::cli::{AlgorithmChoice, Cli, Command, FringeChoice, RunCommand, render_report, run_cli};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         points: 3,
///         seed: 1,
///         algorithm: AlgorithmChoice::Mst,
///         shuffle_seed: None,
///         verbose_limit: 10,
///         fringe: FringeChoice::Batched,
///     }),
/// };
/// let mut buffer = Vec::new();
/// render_report(&run_cli(cli)?, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("Distance using mst: "));
/// assert!(text.contains("Parent of 0 is -1"));
/// # Ok(())
/// # }
/// ```
pub fn render_report(report: &RunReport, mut writer: impl Write) -> io::Result<()> {
    let graph = &report.graph;
    let verbose = graph.vertex_count() <= report.verbose_limit;

    writeln!(
        writer,
        "points: {}, seed: {}",
        graph.vertex_count(),
        report.seed
    )?;
    if verbose {
        for point in graph.points().iter() {
            writeln!(writer, "v{}: ({},{})", point.id(), point.x(), point.y())?;
        }
        writeln!(writer, "weights:")?;
        write_matrix(&mut writer, graph.vertex_count(), |row, col| {
            graph.weights().weight(row, col)
        })?;
    }

    for run in &report.runs {
        writeln!(writer)?;
        render_run(&mut writer, graph, run, verbose)?;
    }
    Ok(())
}

fn render_run(
    writer: &mut impl Write,
    graph: &WeightedGraph,
    run: &SolverRun,
    verbose: bool,
) -> io::Result<()> {
    let algorithm = run.outcome.algorithm();
    writeln!(writer, "== {algorithm} ==")?;
    match &run.outcome {
        SolverOutcome::Exact(solution) => render_exact(writer, solution)?,
        SolverOutcome::Mst(solution) => render_mst(writer, graph, solution, verbose)?,
        SolverOutcome::Greedy(solution) => render_greedy(writer, graph, solution, verbose)?,
        SolverOutcome::Bitonic(solution) => render_bitonic(writer, graph, solution, verbose)?,
    }
    let tour = run.outcome.tour();
    writeln!(
        writer,
        "Distance using {algorithm}: {} for path {tour}",
        tour.distance()
    )?;
    writeln!(writer, "Runtime: {} ms", run.elapsed.as_millis())
}

fn render_exact(writer: &mut impl Write, solution: &ExactSolution) -> io::Result<()> {
    writeln!(writer, "Tours examined: {}", solution.permutations())
}

fn render_mst(
    writer: &mut impl Write,
    graph: &WeightedGraph,
    solution: &MstSolution,
    verbose: bool,
) -> io::Result<()> {
    if verbose {
        writeln!(writer, "MST:")?;
        let parents = solution.parents();
        write_matrix(writer, graph.vertex_count(), |row, col| {
            if parents[row] == Some(col) || parents[col] == Some(row) {
                graph.weights().weight(row, col)
            } else {
                Distance::ZERO
            }
        })?;
    }
    writeln!(writer, "Total MST weight: {}", solution.tree_weight())?;
    if !verbose {
        return Ok(());
    }

    let stops = solution.tour().stops();
    // Drop the closing return to the root.
    let preorder = match stops {
        [_, .., _] => &stops[..stops.len() - 1],
        _ => stops,
    };
    for &vertex in preorder {
        let parent = solution.parents().get(vertex).copied().flatten();
        writeln!(writer, "Parent of {vertex} is {}", signed(parent))?;
    }
    Ok(())
}

fn render_greedy(
    writer: &mut impl Write,
    graph: &WeightedGraph,
    solution: &GreedySolution,
    verbose: bool,
) -> io::Result<()> {
    if verbose {
        writeln!(writer, "Greedy edges:")?;
        write_matrix(writer, graph.vertex_count(), |row, col| {
            solution
                .edges()
                .iter()
                .find(|edge| edge.touches(row) && edge.touches(col) && row != col)
                .map_or(Distance::ZERO, |edge| edge.weight())
        })?;
    }
    for edge in solution.edges() {
        writeln!(
            writer,
            "{} {} weight = {}",
            edge.row(),
            edge.col(),
            edge.weight()
        )?;
    }
    Ok(())
}

fn render_bitonic(
    writer: &mut impl Write,
    graph: &WeightedGraph,
    solution: &BitonicSolution,
    verbose: bool,
) -> io::Result<()> {
    if !verbose {
        return Ok(());
    }
    writeln!(writer, "Sorted by x:")?;
    for &id in solution.order() {
        if let Some(point) = graph.points().get(id) {
            writeln!(writer, "v{id}: ({},{})", point.x(), point.y())?;
        }
    }
    writeln!(writer, "L:")?;
    write_table(writer, solution.lengths(), |length| length.to_string())?;
    writeln!(writer, "N:")?;
    write_table(writer, solution.predecessors(), |&position| signed(position))
}

fn write_matrix(
    writer: &mut impl Write,
    size: usize,
    cell: impl Fn(usize, usize) -> Distance,
) -> io::Result<()> {
    for row in 0..size {
        let line: Vec<String> = (0..size).map(|col| cell(row, col).to_string()).collect();
        writeln!(writer, "{}", line.join("\t"))?;
    }
    Ok(())
}

fn write_table<T>(
    writer: &mut impl Write,
    table: &DpTable<T>,
    render: impl Fn(&T) -> String,
) -> io::Result<()> {
    for row in table.rows() {
        let line: Vec<String> = row.iter().map(&render).collect();
        writeln!(writer, "{}", line.join("\t"))?;
    }
    Ok(())
}

/// Renders an optional index with `-1` standing in for "none".
fn signed(index: Option<usize>) -> String {
    index.map_or_else(|| "-1".to_owned(), |index| index.to_string())
}
