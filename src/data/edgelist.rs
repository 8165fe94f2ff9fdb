//! Plain-text edge list loading
//!
//! One edge per line: `src dst [weight | key=value ...]`. A bare number in
//! the third column is stored under the configured weight key. Lines with a
//! single token declare an isolated node; `#` starts a comment.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use itertools::Itertools;

use crate::graph::{CompressedGraph, EdgeAttrs, GraphBuilder};

/// Load an edge list file into a compressed graph
pub fn load_edge_list(path: &Path, directed: bool, weight_key: &str) -> Result<CompressedGraph> {
    log::info!("Reading edge list: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let graph = parse_edge_list(BufReader::new(file), directed, weight_key)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    log::info!(
        "Loaded graph with {} nodes and {} edges (~{} KiB)",
        graph.node_count,
        graph.edge_count,
        graph.memory_usage() / 1024
    );

    Ok(graph)
}

/// Parse edge-list text from any buffered reader
pub fn parse_edge_list<R: BufRead>(reader: R, directed: bool, weight_key: &str) -> Result<CompressedGraph> {
    let mut builder = GraphBuilder::new(directed);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let tokens = content.split_whitespace().collect_vec();
        match tokens.as_slice() {
            [node] => {
                builder.add_node(node);
            }
            [src, dst, rest @ ..] => {
                let attrs = parse_attrs(rest, weight_key)
                    .with_context(|| format!("line {}: invalid edge attributes", line_no + 1))?;
                builder.add_edge(src, dst, attrs);
            }
            [] => continue,
        }
    }

    Ok(builder.build())
}

fn parse_attrs(tokens: &[&str], weight_key: &str) -> Result<EdgeAttrs> {
    let mut attrs = EdgeAttrs::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                let value: f64 = value.parse()
                    .with_context(|| format!("`{}` is not numeric", value))?;
                attrs.insert(key.to_string(), value);
            }
            None if i == 0 => {
                let value: f64 = token.parse()
                    .with_context(|| format!("`{}` is not a weight", token))?;
                attrs.insert(weight_key.to_string(), value);
            }
            _ => return Err(anyhow!("unexpected token `{}`", token)),
        }
    }

    Ok(attrs)
}
