use hashbrown::HashSet;

use super::dijkstra::{Dijkstra, Path};
use super::heap::MyMinHeap;
use crate::algorithm::EdgeWeight;
use crate::network::{Adjacency, NodeIndex};


/// Yen's k shortest loopless paths over any adjacency view.
///
/// Jin Y. Yen, "Finding the K Shortest Loopless Paths in a Network",
/// Management Science 17(11), 1971. Each round reruns Dijkstra once per spur
/// node, so a query costs about K * |V| Dijkstra runs.
pub struct Yens<'a, A, W: ?Sized> {
    graph: &'a A,
    weight: &'a W,
}

impl<'a, A, W> Yens<'a, A, W>
where A: Adjacency, W: EdgeWeight + ?Sized {
    pub fn new(graph: &'a A, weight: &'a W) -> Self {
        Yens { graph, weight }
    }
    /// Total weight of a path; a hop missing from the graph costs nothing,
    /// which cannot happen for paths produced here.
    pub fn path_weight(&self, path: &[NodeIndex]) -> f64 {
        let network = self.graph.network();
        path.windows(2)
            .filter_map(|ends| network.edge_between(ends[0], ends[1]).map(|e| (ends, e)))
            .map(|(ends, e)| self.weight.weight(
                network.name(ends[0]), network.name(ends[1]), network.metrics(e)))
            .sum()
    }
    /// Up to `k` simple paths in non-decreasing weight. Empty when either end
    /// is outside the view or they are disconnected.
    pub fn k_shortest_paths(&self, src: NodeIndex, dst: NodeIndex, k: usize) -> Vec<(Path, f64)> {
        if k == 0 || !self.graph.contains(src) || !self.graph.contains(dst) {
            return vec![];
        }
        let mut dijkstra = Dijkstra::default();
        dijkstra.compute(self.graph, self.weight, src);
        let shortest = match dijkstra.shortest_path(dst) {
            Some(path) => path,
            None => return vec![],
        };
        let cost = self.path_weight(&shortest);
        let mut list_a = vec![(shortest, cost)];
        let mut heap_b = MyMinHeap::new();

        while list_a.len() < k {
            let prev_path = list_a[list_a.len() - 1].0.clone();
            for i in 0..prev_path.len().saturating_sub(1) {
                let spur_node = prev_path[i];
                let root_path = &prev_path[..=i];

                // For example, if search for 4th shortest path with spur-node (2)
                // We should ignore edges (2)───(3), (2)───(5) and node (1)
                //
                // (1)───(2)───(3)───(4)  1st
                //  │     └────(5)───(4)  2nd
                //  └────(7)───(8)───(4)  3rd

                let ignored_edges: HashSet<_> = list_a.iter()
                    .map(|(path, _)| path)
                    .filter(|path| path.len() > i + 1 && path[..=i] == *root_path)
                    .map(|path| (path[i], path[i+1]))
                    .collect();
                let ignored_nodes: HashSet<_> = root_path[..i].iter()
                    .cloned()
                    .collect();

                let mut spur = Dijkstra::default();
                spur.ignore(ignored_nodes, ignored_edges);
                spur.compute(self.graph, self.weight, spur_node);

                match spur.shortest_path(dst) {
                    Some(spur_path) => {
                        let mut total_path = root_path[..i].to_vec();
                        total_path.extend(spur_path);
                        let total_dist = self.path_weight(&total_path);
                        heap_b.push(total_path, total_dist.into());
                    }
                    None => continue,  // spur-dst exists no more paths
                }
            }
            match heap_b.pop() {
                Some((path, cost)) => list_a.push((path, cost.into())),
                None => break,  // src-dst exists no more paths
            }
        }
        list_a
    }
}
