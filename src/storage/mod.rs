//! Results persistence module

use anyhow::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use serde_json::{json, to_string_pretty, Map, Value};

use crate::algorithms::{
    triangles_and_degree, Clustering, DistanceTable, Distances, SpanningTree, TriangleDegree,
};
use crate::config::Config;
use crate::graph::{CompressedGraph, GraphAccess, NodeId, NodeSelection};

/// Output of a single driver run
pub enum AnalysisOutput {
    Clustering(Clustering),
    Triangles(Vec<TriangleDegree<u64>>),
    Distances(Distances),
    DistanceTable(DistanceTable),
    SpanningTree(SpanningTree),
}

/// Save analysis results to the specified directory
pub fn save_results(
    output: &AnalysisOutput,
    graph: &CompressedGraph,
    config: &Config,
    output_dir: &Path,
) -> Result<PathBuf> {
    log::info!("Saving {:?} results to {}", config.algorithm, output_dir.display());

    fs::create_dir_all(output_dir)?;

    save_summary(output, graph, config, output_dir)?;

    let body = match output {
        AnalysisOutput::Clustering(result) => clustering_json(result, graph),
        AnalysisOutput::Triangles(triples) => triangles_json(triples, graph),
        AnalysisOutput::Distances(dist) => labelled_row(dist.iter().map(|(&n, &d)| (n, d)), graph),
        AnalysisOutput::DistanceTable(table) => Value::Object(
            table.iter()
                .map(|(&u, row)| (graph.label(u), labelled_row(row.iter().map(|(&v, &d)| (v, d)), graph)))
                .collect(),
        ),
        AnalysisOutput::SpanningTree(tree) => spanning_tree_json(tree, graph),
    };

    let path = output_dir.join("result.json");
    write_json(&path, &body)?;

    log::info!("Results saved successfully");

    Ok(path)
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Distances serialize infinity as null
fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn labelled_row(row: impl Iterator<Item = (NodeId, f64)>, graph: &CompressedGraph) -> Value {
    Value::Object(row.map(|(n, v)| (graph.label(n), number(v))).collect::<Map<_, _>>())
}

fn clustering_json(result: &Clustering, graph: &CompressedGraph) -> Value {
    match result {
        Clustering::Scalar(c) => number(*c),
        Clustering::Mapping(m) => labelled_row(m.iter().map(|(&n, &c)| (n, c)), graph),
    }
}

fn triangles_json(triples: &[TriangleDegree<u64>], graph: &CompressedGraph) -> Value {
    Value::Array(
        triples.iter()
            .map(|td| {
                json!({
                    "node": graph.label(td.node),
                    "degree": td.degree,
                    "triangles": td.triangles,
                })
            })
            .collect(),
    )
}

fn spanning_tree_json(tree: &SpanningTree, graph: &CompressedGraph) -> Value {
    json!({
        "total_weight": tree.total_weight(),
        "edges": tree.edges().iter()
            .map(|&(u, v, w)| json!([graph.label(u), graph.label(v), w]))
            .collect::<Vec<_>>(),
    })
}

/// Save summary information
fn save_summary(
    output: &AnalysisOutput,
    graph: &CompressedGraph,
    config: &Config,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Saving summary information");

    let node_count = graph.node_count;
    let edge_count = graph.number_of_edges();
    let avg_degree = if node_count == 0 {
        0.0
    } else {
        graph.targets.len() as f64 / node_count as f64
    };

    let mut summary = json!({
        "algorithm": config.algorithm,
        "weight_key": config.weight_key,
        "graph_stats": {
            "node_count": node_count,
            "edge_count": edge_count,
            "directed": graph.is_directed(),
            "avg_degree": avg_degree,
            "max_degree": graph.max_degree(),
        },
    });

    let extra = match output {
        AnalysisOutput::Clustering(result) => json!({ "average_clustering": result.average() }),
        AnalysisOutput::Triangles(triples) => {
            // every triangle is seen twice from each of its three corners,
            // so the graph total needs every node whatever the selection was
            let total = triangles_and_degree(graph, &NodeSelection::All)?
                .iter()
                .map(|td| td.triangles)
                .sum::<u64>() / 6;
            json!({
                "selected_nodes": triples.len(),
                "selected_triangles": triples.iter().map(|td| td.triangles).sum::<u64>() / 2,
                "total_triangles": total,
            })
        }
        AnalysisOutput::Distances(dist) => json!({ "reached_nodes": dist.len() }),
        AnalysisOutput::DistanceTable(table) => json!({ "pairs": table.values().map(|r| r.len()).sum::<usize>() }),
        AnalysisOutput::SpanningTree(tree) => json!({
            "tree_edges": tree.edge_count(),
            "total_weight": tree.total_weight(),
        }),
    };
    if let (Some(summary), Value::Object(extra)) = (summary.as_object_mut(), extra) {
        summary.extend(extra);
    }

    write_json(&output_dir.join("summary.json"), &summary)
}
