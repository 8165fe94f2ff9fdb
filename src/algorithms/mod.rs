//! Graph analytics routines

pub mod triangles;
pub mod clustering;
pub mod paths;
pub mod mst;

pub use clustering::{clustering, Clustering};
pub use mst::{kruskal, prim, SpanningTree};
pub use paths::{dijkstra_multisource, floyd, DistanceTable, Distances};
pub use triangles::{triangles_and_degree, weighted_triangles_and_degree, TriangleDegree};
