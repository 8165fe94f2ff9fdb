use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use graph_clustering::algorithms;
use graph_clustering::config::{Algorithm, Config};
use graph_clustering::data::edgelist;
use graph_clustering::storage::{self, AnalysisOutput};
use graph_clustering::{CompressedGraph, GraphResult};

#[derive(Parser, Debug)]
#[clap(
    name = "graph-clustering",
    about = "Clustering, triangle, shortest path and spanning tree analytics over edge lists"
)]
struct Cli {
    /// Path to input edge list
    #[clap(long)]
    input: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "graph_results")]
    output_dir: PathBuf,

    /// Routine to run
    #[clap(long, value_enum, default_value = "clustering")]
    algorithm: Algorithm,

    /// Edge attribute holding weights (unweighted when omitted)
    #[clap(long)]
    weight: Option<String>,

    /// Node labels to restrict clustering/triangles to (comma separated)
    #[clap(long, value_delimiter = ',')]
    nodes: Vec<String>,

    /// Source node labels for Dijkstra (comma separated)
    #[clap(long, value_delimiter = ',')]
    sources: Vec<String>,

    /// Stop Dijkstra once this node is settled
    #[clap(long)]
    target: Option<String>,

    /// Treat edges as directed
    #[clap(long)]
    directed: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn run(graph: &CompressedGraph, config: &Config, args: &Cli) -> Result<AnalysisOutput> {
    let weight = config.weight_key();

    let output = match config.algorithm {
        Algorithm::Clustering => AnalysisOutput::Clustering(
            algorithms::clustering(graph, &graph.selection(&args.nodes)?, weight)?,
        ),
        Algorithm::Triangles => AnalysisOutput::Triangles(
            algorithms::triangles_and_degree(graph, &graph.selection(&args.nodes)?)?,
        ),
        Algorithm::Dijkstra => {
            let sources = args.sources.iter()
                .map(|l| graph.resolve_label(l))
                .collect::<GraphResult<Vec<_>>>()?;
            let target = args.target.as_deref()
                .map(|l| graph.resolve_label(l))
                .transpose()?;
            AnalysisOutput::Distances(algorithms::dijkstra_multisource(graph, &sources, weight, target)?)
        }
        Algorithm::Floyd => AnalysisOutput::DistanceTable(algorithms::floyd(graph, weight)?),
        Algorithm::Prim => AnalysisOutput::SpanningTree(algorithms::prim(graph, weight)?),
        Algorithm::Kruskal => AnalysisOutput::SpanningTree(algorithms::kruskal(graph, weight)?),
    };

    Ok(output)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(args.algorithm, args.directed, args.weight.clone());

    log::info!("Starting {:?} analysis", config.algorithm);
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output_dir.display());

    // 1. Load data
    let graph = edgelist::load_edge_list(&args.input, config.directed, &config.load_weight_key)?;

    // 2. Run the requested routine
    let output = run(&graph, &config, &args)
        .with_context(|| format!("{:?} failed", config.algorithm))?;

    if let AnalysisOutput::Clustering(result) = &output {
        match result.as_scalar() {
            Some(c) => log::info!("Clustering coefficient: {}", c),
            None => log::info!("Average clustering: {}", result.average()),
        }
    }

    // 3. Save results
    let path = storage::save_results(&output, &graph, &config, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", path.display());

    Ok(())
}
