//! Configuration management for the graph analytics driver

use clap::ValueEnum;
use serde::{Serialize, Deserialize};

/// Routine to run over the loaded graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Local clustering coefficients
    Clustering,
    /// Per-node triangle counts and degrees
    Triangles,
    /// Multi-source shortest path distances
    Dijkstra,
    /// All-pairs shortest path distances
    Floyd,
    /// Minimum spanning tree via Prim
    Prim,
    /// Minimum spanning tree via Kruskal
    Kruskal,
}

/// Default configuration for the analytics driver
#[derive(Debug, Clone)]
pub struct Config {
    /// Routine to run
    pub algorithm: Algorithm,

    /// Treat the edge list as directed
    pub directed: bool,

    /// Attribute weights are read under; `None` means unweighted
    pub weight_key: Option<String>,

    /// Key a bare third-column number is stored under while loading
    pub load_weight_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Clustering,
            directed: false,
            weight_key: None,
            load_weight_key: "weight".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(algorithm: Algorithm, directed: bool, weight_key: Option<String>) -> Self {
        let load_weight_key = weight_key.clone().unwrap_or_else(|| Self::default().load_weight_key);
        Self {
            algorithm,
            directed,
            weight_key,
            load_weight_key,
        }
    }

    pub fn weight_key(&self) -> Option<&str> {
        self.weight_key.as_deref()
    }
}
