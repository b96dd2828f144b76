use super::base::yens::Yens;
use super::EdgeWeight;
use crate::network::{Adjacency, Path};


/// Up to `k` simple paths from `src` to `dst` in non-decreasing total
/// weight, over the whole graph or any edge-induced view of it.
///
/// An absent endpoint or a disconnected pair yields no paths; `src == dst`
/// yields the single hop `[src]` when the node is in the view.
pub fn k_shortest_paths<A, W>(graph: &A, src: &str, dst: &str, weight: &W, k: usize) -> Vec<Path>
where A: Adjacency, W: EdgeWeight + ?Sized {
    weighted_k_shortest_paths(graph, src, dst, weight, k)
        .into_iter()
        .map(|(path, _)| path)
        .collect()
}

/// As [`k_shortest_paths`], also returning each path's total weight.
pub fn weighted_k_shortest_paths<A, W>(graph: &A, src: &str, dst: &str, weight: &W, k: usize)
    -> Vec<(Path, f64)>
where A: Adjacency, W: EdgeWeight + ?Sized {
    let network = graph.network();
    let (src, dst) = match (network.node_index(src), network.node_index(dst)) {
        (Some(src), Some(dst)) => (src, dst),
        _ => return vec![],
    };
    Yens::new(graph, weight)
        .k_shortest_paths(src, dst, k)
        .into_iter()
        .map(|(path, cost)| (network.names(&path), cost))
        .collect()
}
