use std::collections::VecDeque;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use graph_walk_core::{find_cycles, run_algorithm, Algorithm, Graph, Outcome, Result, VertexId};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Time the graph-walk engines on synthetic topologies.
#[derive(Debug, Parser)]
#[command(name = "graph-walk-bench", version)]
struct Cli {
    /// Topology to generate
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Number of vertices per generated graph
    #[arg(long, env = "GRAPH_WALK_BENCH_NODES", default_value_t = 2_000)]
    nodes: u64,

    /// Seed for the generators; each generator offsets it
    #[arg(long, env = "GRAPH_WALK_BENCH_SEED", default_value_t = 42)]
    seed: u64,

    /// Skip cycle enumeration above this many vertices
    #[arg(long, default_value_t = 500)]
    cycle_limit: u64,

    /// Build graphs with one-way edges
    #[arg(long)]
    directed: bool,

    /// Print one JSON report instead of a table
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    All,
    Lsystem,
    Scalefree,
    Smallworld,
    Random,
    Barbell,
    Dla,
}

type Generator = fn(&mut Graph, u64, &mut FastRng) -> Result<()>;

const GENERATORS: [(Mode, &str, Generator); 6] = [
    (Mode::Lsystem, "L-system tree", gen_lsystem),
    (Mode::Scalefree, "Scale-free (edge sampling)", gen_scale_free),
    (Mode::Smallworld, "Small-world (Watts-Strogatz)", gen_small_world),
    (Mode::Random, "Erdos-Renyi random", gen_random),
    (Mode::Barbell, "Barbell (clique-bridge-clique)", gen_barbell),
    (Mode::Dla, "DLA (organic branching)", gen_dla),
];

#[derive(Debug, Serialize)]
struct Report {
    name: &'static str,
    vertices: usize,
    edges: usize,
    memory_bytes: usize,
    generate_ms: f64,
    runs: Vec<RunReport>,
}

#[derive(Debug, Serialize)]
struct RunReport {
    algorithm: Algorithm,
    elapsed_ms: f64,
    /// Path length in edges, or number of cycles for DFS. None when no path.
    result: Option<usize>,
    distance: Option<f64>,
    skipped: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins, then `GRAPH_WALK_LOG`, then the
/// verbosity flag.
fn init_tracing(verbose: bool) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "graph_walk=debug" } else { "graph_walk=info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("GRAPH_WALK_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn run(cli: &Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    if cli.nodes < 2 {
        return Err("--nodes must be at least 2".into());
    }

    let mut reports = Vec::new();
    for (i, (mode, name, generator)) in GENERATORS.iter().enumerate() {
        if cli.mode != Mode::All && cli.mode != *mode {
            continue;
        }
        let mut rng = FastRng::new(cli.seed.wrapping_add(i as u64 * 7919));
        let report = bench_one(cli, *name, *generator, &mut rng)?;
        if !cli.json {
            print_report(&report);
        }
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn bench_one(
    cli: &Cli,
    name: &'static str,
    generator: Generator,
    rng: &mut FastRng,
) -> std::result::Result<Report, Box<dyn std::error::Error>> {
    info!(name, nodes = cli.nodes, "generating");
    let t = Instant::now();
    let mut graph = Graph::with_capacity(
        cli.directed,
        reserve_hint(cli.nodes, 1),
        reserve_hint(cli.nodes, 10),
    );
    generator(&mut graph, cli.nodes, rng)?;
    let generate_ms = t.elapsed().as_secs_f64() * 1000.0;

    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
        return Err(format!("{} produced an empty graph", name).into());
    };

    let mut runs = Vec::new();
    for algorithm in [Algorithm::Bfs, Algorithm::Dijkstra] {
        let t = Instant::now();
        let outcome = run_algorithm(&graph, algorithm, Some(first), Some(last))?;
        let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;
        let (result, distance) = match &outcome {
            Outcome::Path(p) => (Some(p.hops()), Some(p.distance.as_f64())),
            _ => (None, None),
        };
        debug!(%algorithm, elapsed_ms, ?result, "run finished");
        runs.push(RunReport {
            algorithm,
            elapsed_ms,
            result,
            distance,
            skipped: false,
        });
    }

    if graph.vertex_count() as u64 > cli.cycle_limit {
        warn!(
            vertices = graph.vertex_count(),
            limit = cli.cycle_limit,
            "cycle enumeration skipped"
        );
        runs.push(RunReport {
            algorithm: Algorithm::Dfs,
            elapsed_ms: 0.0,
            result: None,
            distance: None,
            skipped: true,
        });
    } else {
        let t = Instant::now();
        let cycles = find_cycles(&graph)?;
        runs.push(RunReport {
            algorithm: Algorithm::Dfs,
            elapsed_ms: t.elapsed().as_secs_f64() * 1000.0,
            result: Some(cycles.len()),
            distance: None,
            skipped: false,
        });
    }

    Ok(Report {
        name,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        memory_bytes: graph.memory_usage(),
        generate_ms,
        runs,
    })
}

/// Largest up-front reservation; bigger graphs grow on demand.
const MAX_RESERVE: usize = 1 << 24;

/// Capacity hint for `per_vertex` items per generated vertex.
fn reserve_hint(nodes: u64, per_vertex: usize) -> usize {
    usize::try_from(nodes)
        .unwrap_or(usize::MAX)
        .saturating_mul(per_vertex)
        .min(MAX_RESERVE)
}

fn print_report(report: &Report) {
    println!("--- {} ---", report.name);
    println!(
        "Generated in {:.1}ms: {} vertices, {} edges, ~{:.1}KB",
        report.generate_ms,
        report.vertices,
        report.edges,
        report.memory_bytes as f64 / 1024.0
    );
    println!("{:>10} {:>12} {:>12} {:>10}", "algorithm", "result", "distance", "time");
    println!("{:->10} {:->12} {:->12} {:->10}", "", "", "", "");
    for run in &report.runs {
        let result = match (run.skipped, run.result) {
            (true, _) => "skipped".to_string(),
            (false, Some(r)) => r.to_string(),
            (false, None) => "no path".to_string(),
        };
        let distance = run.distance.map(|d| format!("{:.2}", d)).unwrap_or_default();
        println!(
            "{:>10} {:>12} {:>12} {:>8.2}ms",
            run.algorithm.name(),
            result,
            distance,
            run.elapsed_ms
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic for a given seed, linear in vertices plus edges
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Edge weight in `[1, 10)`.
    fn weight(&mut self) -> f64 {
        1.0 + self.next_f64() * 9.0
    }
}

/// Adds vertex `c_<n>` at a random canvas position and returns its id.
fn add(graph: &mut Graph, rng: &mut FastRng) -> Result<VertexId> {
    let label = format!("c_{}", graph.vertex_count());
    let (x, y) = (rng.next_f64() * 1000.0, rng.next_f64() * 1000.0);
    graph.create_vertex(label, x, y)
}

fn add_many(graph: &mut Graph, count: u64, rng: &mut FastRng) -> Result<Vec<VertexId>> {
    (0..count).map(|_| add(graph, rng)).collect()
}

fn link(graph: &mut Graph, from: VertexId, to: VertexId, rng: &mut FastRng) {
    let weight = rng.weight();
    if let Err(e) = graph.add_edge(from, to, weight) {
        warn!(%from, %to, error = %e, "edge dropped");
    }
}

/// Fractal tree: every vertex spawns three children. Deep paths, no cycles.
fn gen_lsystem(graph: &mut Graph, n: u64, rng: &mut FastRng) -> Result<()> {
    let branching = 3;
    let root = add(graph, rng)?;
    let mut frontier = vec![root];

    while (graph.vertex_count() as u64) < n && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if graph.vertex_count() as u64 >= n {
                    break;
                }
                let child = add(graph, rng)?;
                link(graph, parent, child, rng);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }
    Ok(())
}

/// Preferential attachment by sampling a random endpoint of an existing edge.
fn gen_scale_free(graph: &mut Graph, n: u64, rng: &mut FastRng) -> Result<()> {
    let edges_per_vertex = 4u64;
    let seed = 5u64.min(n);
    let mut endpoints: Vec<VertexId> = Vec::new();

    let clique = add_many(graph, seed, rng)?;
    for (i, &a) in clique.iter().enumerate() {
        for &b in &clique[i + 1..] {
            link(graph, a, b, rng);
            endpoints.extend([a, b]);
        }
    }

    for _ in seed..n {
        let v = add(graph, rng)?;
        for _ in 0..edges_per_vertex {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != v {
                link(graph, v, target, rng);
                endpoints.extend([v, target]);
            }
        }
    }
    Ok(())
}

/// Watts-Strogatz: ring lattice with a few edges rewired at random.
fn gen_small_world(graph: &mut Graph, n: u64, rng: &mut FastRng) -> Result<()> {
    let k = 3u64.min(n - 1);
    let p = 0.05;
    let ids = add_many(graph, n, rng)?;

    for i in 0..n {
        for j in 1..=k {
            let mut target = (i + j) % n;
            if rng.next_f64() < p {
                let rewired = rng.next(n);
                if rewired != i {
                    target = rewired;
                }
            }
            link(graph, ids[i as usize], ids[target as usize], rng);
        }
    }
    Ok(())
}

/// Erdos-Renyi: uniform random edges, about three per vertex.
fn gen_random(graph: &mut Graph, n: u64, rng: &mut FastRng) -> Result<()> {
    let ids = add_many(graph, n, rng)?;
    for _ in 0..n * 3 {
        let from = rng.next(n);
        let to = rng.next(n);
        if from != to {
            link(graph, ids[from as usize], ids[to as usize], rng);
        }
    }
    Ok(())
}

/// Two dense clusters joined by a thin chain of bridge vertices.
fn gen_barbell(graph: &mut Graph, n: u64, rng: &mut FastRng) -> Result<()> {
    let bridge_len = 10u64.min(n / 3);
    let clique_size = (n - bridge_len) / 2;

    let cluster_a = add_many(graph, clique_size, rng)?;
    let bridge = add_many(graph, bridge_len, rng)?;
    let cluster_b = add_many(graph, n - clique_size - bridge_len, rng)?;

    for cluster in [&cluster_a, &cluster_b] {
        let size = cluster.len() as u64;
        for (i, &v) in cluster.iter().enumerate() {
            for _ in 0..6u64.min(size.saturating_sub(1)) {
                let target = rng.next(size) as usize;
                if target != i {
                    link(graph, v, cluster[target], rng);
                }
            }
        }
    }

    let chain: Vec<VertexId> = cluster_a
        .last()
        .into_iter()
        .chain(&bridge)
        .chain(cluster_b.first())
        .copied()
        .collect();
    for pair in chain.windows(2) {
        link(graph, pair[0], pair[1], rng);
    }
    Ok(())
}

/// Diffusion-limited aggregation, simplified: each new vertex sticks to a
/// recent "surface" vertex, with occasional long-range links that close loops.
fn gen_dla(graph: &mut Graph, n: u64, rng: &mut FastRng) -> Result<()> {
    let surface_max = 1000usize;
    let seed = add(graph, rng)?;
    let mut all = vec![seed];
    let mut surface: VecDeque<VertexId> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(seed);

    for _ in 1..n {
        let v = add(graph, rng)?;
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        link(graph, v, attach_to, rng);

        if rng.next(10) == 0 {
            let other = all[rng.next(all.len() as u64) as usize];
            if other != attach_to {
                link(graph, v, other, rng);
            }
        }

        all.push(v);
        surface.push_back(v);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }
    Ok(())
}
