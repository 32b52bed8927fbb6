mod edge_list;
mod generators;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use allpaths_core::{
    BfsShortestPaths, DijkstraShortestPaths, EdgeWeight, FloatAlgebra, Graph, GraphView, IntegerAlgebra, NodeId, RelTypeFilter, ShortestPaths, TraversalConfig,
    TraversalDirection, UnitCost,
};
use anyhow::{bail, ensure, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "allpaths-bench", version, about = "All-shortest-paths harness and benchmark")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every shortest path between two named nodes of an edge list
    Paths(PathsArgs),
    /// Time both engines on synthetic graphs
    Bench(BenchArgs),
}

#[derive(Args)]
struct PathsArgs {
    /// Edge list file: `from to type [weight]` per line
    #[arg(long)]
    graph: PathBuf,

    /// Start node name
    #[arg(long)]
    from: String,

    /// Target node name
    #[arg(long)]
    to: String,

    /// outgoing, incoming or both
    #[arg(long, default_value = "both")]
    direction: TraversalDirection,

    /// Comma-separated relationship types, `*` for all
    #[arg(long, default_value = "*")]
    types: String,

    /// Dijkstra uses stored edge weights instead of unit cost
    #[arg(long)]
    weighted: bool,

    /// BFS hop limit
    #[arg(long, allow_negative_numbers = true)]
    max_depth: Option<i64>,

    /// Dijkstra cost cap
    #[arg(long)]
    max_cost: Option<f64>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Skip enumeration when more paths than this exist
    #[arg(long, default_value_t = 10_000)]
    max_paths: u64,
}

#[derive(Args)]
struct BenchArgs {
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Target node count per generated graph
    #[arg(long, default_value_t = 200_000)]
    nodes: u64,

    /// Skip enumeration when more paths than this exist
    #[arg(long, default_value_t = 10_000)]
    max_paths: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    All,
    Lsystem,
    Smallworld,
    Random,
    Barbell,
    Lattice,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_json)?;

    match cli.command {
        Command::Paths(args) => run_paths(args),
        Command::Bench(args) => run_bench(args),
    }
}

// ---------------------------------------------------------------------------
// paths
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PathsReport {
    from: String,
    to: String,
    direction: String,
    nodes: usize,
    relationships: usize,
    relationship_types: Vec<String>,
    results: Vec<EngineReport>,
}

#[derive(Serialize)]
struct EngineReport {
    engine: &'static str,
    cost: Option<f64>,
    /// Distinct node sequences, the unit `paths` is listed in.
    path_count: u64,
    paths: Vec<Vec<String>>,
    truncated: bool,
    elapsed_ms: f64,
}

fn run_paths(args: PathsArgs) -> anyhow::Result<()> {
    let graph = edge_list::read_graph(&args.graph)?;
    tracing::info!(
        nodes = graph.node_count(),
        relationships = graph.edge_count(),
        types = graph.rel_type_count(),
        "graph loaded"
    );

    let source = graph
        .resolve_name(&args.from)
        .with_context(|| format!("node not found: {}", args.from))?;
    let target = graph
        .resolve_name(&args.to)
        .with_context(|| format!("node not found: {}", args.to))?;
    let types = graph.rel_type_filter(&args.types)?;
    let mut config = TraversalConfig::new(args.direction, types);
    config.max_depth = args
        .max_depth
        .map(|d| check_non_negative(d, "max_depth"))
        .transpose()?;

    let mut results = Vec::with_capacity(2);

    let mut bfs = BfsShortestPaths::new(&graph, config.clone());
    let r = report(&mut bfs, "bfs", source, target, &graph, args.max_paths, f64::from)?;
    results.push(r);

    if args.weighted {
        let mut dijkstra: DijkstraShortestPaths<_, FloatAlgebra, _> =
            DijkstraShortestPaths::new(&graph, EdgeWeight(&graph), config);
        dijkstra.limit_max_cost(args.max_cost);
        let r = report(&mut dijkstra, "dijkstra", source, target, &graph, args.max_paths, |c| c)?;
        results.push(r);
    } else {
        let mut dijkstra: DijkstraShortestPaths<_, IntegerAlgebra, _> =
            DijkstraShortestPaths::new(&graph, UnitCost, config);
        dijkstra.limit_max_cost(args.max_cost.map(|c| c.floor() as i64));
        let r = report(&mut dijkstra, "dijkstra", source, target, &graph, args.max_paths, |c| {
            c as f64
        })?;
        results.push(r);
    }

    let summary = PathsReport {
        from: args.from,
        to: args.to,
        direction: format!("{:?}", args.direction).to_lowercase(),
        nodes: graph.node_count(),
        relationships: graph.edge_count(),
        relationship_types: graph
            .all_relationship_types()
            .into_iter()
            .filter_map(|t| graph.rel_type_name(t).map(str::to_string))
            .collect(),
        results,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary);
    }
    Ok(())
}

/// Validate a signed hop limit from the command line.
fn check_non_negative(value: i64, param_name: &str) -> anyhow::Result<u32> {
    if value < 0 {
        bail!("{} must be non-negative, got {}", param_name, value);
    }
    u32::try_from(value).with_context(|| format!("{} out of range: {}", param_name, value))
}

fn report<S>(
    engine: &mut S,
    name: &'static str,
    source: NodeId,
    target: NodeId,
    graph: &Graph,
    max_paths: u64,
    to_f64: impl Fn(S::Cost) -> f64,
) -> anyhow::Result<EngineReport>
where
    S: ShortestPaths<Node = NodeId>,
{
    let t = Instant::now();
    engine.set_start_node(source)?;
    engine.calculate()?;
    let elapsed = t.elapsed();

    let cost = engine.get_cost(target)?.map(to_f64);
    let path_count = engine.count_node_paths(target)?;
    let truncated = path_count > max_paths;
    let paths = if truncated {
        tracing::warn!(
            engine = name,
            path_count,
            max_paths,
            "too many paths, skipping enumeration"
        );
        Vec::new()
    } else {
        engine
            .get_paths_as_nodes(target)?
            .into_iter()
            .map(|p| p.into_iter().map(|n| graph.display_name(n)).collect())
            .collect()
    };

    Ok(EngineReport {
        engine: name,
        cost,
        path_count,
        paths,
        truncated,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    })
}

fn print_report(report: &PathsReport) {
    println!(
        "Graph: {} nodes, {} relationships, {} types ({})",
        report.nodes,
        report.relationships,
        report.relationship_types.len(),
        report.relationship_types.join(", ")
    );
    println!("{} -> {} ({})", report.from, report.to, report.direction);

    for r in &report.results {
        println!();
        match r.cost {
            Some(cost) => println!(
                "{}: cost {}, {} path(s) in {:.2}ms",
                r.engine, cost, r.path_count, r.elapsed_ms
            ),
            None => println!("{}: unreached ({:.2}ms)", r.engine, r.elapsed_ms),
        }
        if r.truncated {
            println!("  (enumeration skipped)");
        }
        for path in &r.paths {
            println!("  {}", path.join(" -> "));
        }
    }
}

// ---------------------------------------------------------------------------
// bench
// ---------------------------------------------------------------------------

fn run_bench(args: BenchArgs) -> anyhow::Result<()> {
    let suite: Vec<(&str, fn(u64) -> Graph)> = match args.mode {
        Mode::Lsystem => vec![("L-system tree", generators::lsystem)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", generators::small_world)],
        Mode::Random => vec![("Erdos-Renyi random", generators::random)],
        Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", generators::barbell)],
        Mode::Lattice => vec![("Lattice grid", generators::lattice)],
        Mode::All => vec![
            ("L-system tree", generators::lsystem as fn(u64) -> Graph),
            ("Small-world (Watts-Strogatz)", generators::small_world),
            ("Erdos-Renyi random", generators::random),
            ("Barbell (cluster-bridge-cluster)", generators::barbell),
            ("Lattice grid", generators::lattice),
        ],
    };

    println!("allpaths-bench");
    println!("==============");
    println!();

    for (name, generator) in suite {
        bench_one(name, generator, args.nodes, args.max_paths)?;
    }
    Ok(())
}

fn bench_one(
    name: &str,
    generator: fn(u64) -> Graph,
    node_count: u64,
    max_paths: u64,
) -> anyhow::Result<()> {
    println!("--- {} ---", name);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.2}s: {} nodes, {} relationships, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let source: NodeId = 0;
    let config = TraversalConfig::new(TraversalDirection::Both, RelTypeFilter::All);

    let mut bfs = BfsShortestPaths::new(&graph, config.clone());
    let mut unit: DijkstraShortestPaths<_, IntegerAlgebra, _> =
        DijkstraShortestPaths::new(&graph, UnitCost, config.clone());
    let mut weighted: DijkstraShortestPaths<_, FloatAlgebra, _> =
        DijkstraShortestPaths::new(&graph, EdgeWeight(&graph), config);

    println!();
    println!("{:>18} {:>12} {:>10}", "engine", "settled", "time");
    println!("{:->18} {:->12} {:->10}", "", "", "");
    timed_run(&mut bfs, "bfs", source)?;
    timed_run(&mut unit, "dijkstra (unit)", source)?;
    timed_run(&mut weighted, "dijkstra (weight)", source)?;

    // BFS hop counts must match unit-cost Dijkstra everywhere.
    let mut farthest = (source, 0u32);
    let mut mismatches = 0usize;
    for (&node, _) in graph.nodes_iter() {
        let hops = bfs.get_cost(node)?;
        if hops.map(i64::from) != unit.get_cost(node)? {
            mismatches += 1;
        }
        if let Some(h) = hops {
            if h > farthest.1 || (h == farthest.1 && node > farthest.0) {
                farthest = (node, h);
            }
        }
    }
    ensure!(
        mismatches == 0,
        "{}: BFS and unit-cost Dijkstra disagree on {} nodes",
        name,
        mismatches
    );

    let (target, hops) = farthest;
    println!();
    let count = bfs.count_paths(target)?;
    if count > max_paths {
        println!(
            "Farthest node {} at {} hops: {} shortest paths (enumeration skipped)",
            target,
            hops,
            if count == u64::MAX { "≥ 2^64".to_string() } else { count.to_string() }
        );
    } else {
        let t = Instant::now();
        let paths = bfs.get_paths(target)?;
        println!(
            "Farthest node {} at {} hops: {} shortest paths enumerated in {:.1}ms",
            target,
            hops,
            paths.len(),
            t.elapsed().as_secs_f64() * 1000.0
        );
    }

    let weighted_paths = weighted.count_paths(target)?;
    if let Some(cost) = weighted.get_cost(target)? {
        println!("Weighted cost to {}: {} over {} path(s)", target, cost, weighted_paths);
    }
    println!();
    Ok(())
}

fn timed_run<S: ShortestPaths<Node = NodeId>>(
    engine: &mut S,
    name: &str,
    source: NodeId,
) -> anyhow::Result<()> {
    let t = Instant::now();
    engine.set_start_node(source)?;
    engine.calculate()?;
    println!(
        "{:>18} {:>12} {:>8.1}ms",
        name,
        engine.settled_count(),
        t.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
