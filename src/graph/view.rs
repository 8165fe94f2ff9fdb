//! Edge-weight lookups over a `GraphAccess` implementor

use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphAccess, NodeId};

/// Weight used for edges without the requested attribute
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Weight of `u -> v` under `key`, divided by `normalizer`.
///
/// A missing attribute, a missing key or a missing edge all read as
/// `DEFAULT_WEIGHT`.
pub fn weight<G>(graph: &G, u: NodeId, v: NodeId, key: Option<&str>, normalizer: f64) -> f64
where
    G: GraphAccess + ?Sized,
{
    raw_weight(graph, u, v, key) / normalizer
}

fn raw_weight<G>(graph: &G, u: NodeId, v: NodeId, key: Option<&str>) -> f64
where
    G: GraphAccess + ?Sized,
{
    key.and_then(|k| graph.edge_attrs(u, v).and_then(|attrs| attrs.get(k)))
        .copied()
        .unwrap_or(DEFAULT_WEIGHT)
}

/// Weight of `u -> v`, rejecting NaN and infinite values
pub fn finite_weight<G>(graph: &G, u: NodeId, v: NodeId, key: Option<&str>) -> GraphResult<f64>
where
    G: GraphAccess + ?Sized,
{
    let w = raw_weight(graph, u, v, key);
    if w.is_finite() {
        Ok(w)
    } else {
        Err(GraphError::InvalidWeight { u, v, weight: w })
    }
}

/// Weight of `u -> v`, additionally rejecting negative values
pub fn non_negative_weight<G>(graph: &G, u: NodeId, v: NodeId, key: Option<&str>) -> GraphResult<f64>
where
    G: GraphAccess + ?Sized,
{
    let w = finite_weight(graph, u, v, key)?;
    if w < 0.0 {
        return Err(GraphError::InvalidWeight { u, v, weight: w });
    }
    Ok(w)
}

/// Largest weight under `key` across every edge of the graph.
///
/// Returns `DEFAULT_WEIGHT` when no key is given, the graph has no edges,
/// or every weight is zero, so the result is always usable as a divisor.
pub fn max_weight<G>(graph: &G, key: Option<&str>) -> GraphResult<f64>
where
    G: GraphAccess + ?Sized,
{
    let Some(key) = key else {
        return Ok(DEFAULT_WEIGHT);
    };
    if graph.number_of_edges() == 0 {
        return Ok(DEFAULT_WEIGHT);
    }

    let mut max: Option<f64> = None;
    for (u, v, attrs) in graph.adjacency() {
        let w = attrs.get(key).copied().unwrap_or(DEFAULT_WEIGHT);
        if !w.is_finite() || w < 0.0 {
            return Err(GraphError::InvalidWeight { u, v, weight: w });
        }
        max = Some(max.map_or(w, |m| m.max(w)));
    }

    Ok(match max {
        Some(m) if m > 0.0 => m,
        _ => DEFAULT_WEIGHT,
    })
}
