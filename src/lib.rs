//! Clustering, triangle counting, shortest paths and spanning trees over a
//! read-only graph view

pub mod algorithms;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use error::{GraphError, GraphResult};
pub use graph::{CompressedGraph, GraphAccess, GraphBuilder, NodeId, NodeSelection};
