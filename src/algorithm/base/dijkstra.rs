use std::f64::INFINITY as INF;

use hashbrown::{HashMap, HashSet};

use super::heap::MyMinHeap;
use crate::algorithm::EdgeWeight;
use crate::network::{Adjacency, NodeIndex};

pub type Path = Vec<NodeIndex>;


/// Single-source shortest paths. Yen's spur searches reuse it with some
/// nodes and directed hops masked out.
#[derive(Default)]
pub struct Dijkstra {
    dist: HashMap<NodeIndex, f64>,
    pred: HashMap<NodeIndex, NodeIndex>,
    ignore_nodes: HashSet<NodeIndex>,
    ignore_edges: HashSet<(NodeIndex, NodeIndex)>,
}


impl Dijkstra {
    pub fn compute<A, W>(&mut self, graph: &A, weight: &W, r: NodeIndex)
    where A: Adjacency, W: EdgeWeight + ?Sized {
        self.dist.clear();
        self.pred.clear();
        if !graph.contains(r) || self.ignore_nodes.contains(&r) { return }
        let network = graph.network();
        let mut heap = MyMinHeap::new();
        let mut seen = HashMap::new();

        seen.insert(r, 0.0);
        heap.push(r, 0.0.into());

        // popped nodes are final
        while let Some((v, rv_dist)) = heap.pop() {
            let rv_dist: f64 = rv_dist.into();
            if self.dist.contains_key(&v) { continue; }
            self.dist.insert(v, rv_dist);

            for &edge in graph.incidents(v) {
                let u = network.opposite(edge, v);
                if self.ignore_nodes.contains(&u)
                    || self.ignore_edges.contains(&(v, u)) { continue; }

                let cost = weight.weight(network.name(v), network.name(u), network.metrics(edge));
                let ru_dist = rv_dist + cost;

                if self.dist.contains_key(&u)
                    || ru_dist >= *seen.get(&u).unwrap_or(&INF) { continue; }

                self.pred.insert(u, v);
                seen.insert(u, ru_dist);
                match heap.get(&u) {
                    Some(_) => { heap.change_priority(&u, ru_dist.into()); },
                    None    => { heap.push(u, ru_dist.into()); },
                }
            }
        }
    }
    pub fn distance(&self, dst: NodeIndex) -> Option<f64> {
        self.dist.get(&dst).copied()
    }
    pub fn shortest_path(&self, dst: NodeIndex) -> Option<Path> {
        if !self.dist.contains_key(&dst) { return None }
        let mut path = vec![dst];
        let mut node = dst;
        while let Some(&pred) = self.pred.get(&node) {
            path.push(pred);
            node = pred;
        }
        path.reverse();
        Some(path)
    }
    pub fn ignore(&mut self, nodes: HashSet<NodeIndex>, edges: HashSet<(NodeIndex, NodeIndex)>) {
        self.ignore_nodes = nodes;
        self.ignore_edges = edges;
    }
}



#[cfg(test)]
mod test {
    use super::Dijkstra;
    use crate::algorithm::MetricWeight;
    use crate::network::{Graph, Link, Metric, NodeIndex, Topology};

    fn graph(edges: Vec<(&str, &str, f64)>) -> Graph {
        let links = edges.into_iter()
            .map(|(a, b, delay)| Link::new(a, b).with_metadata("delay", delay))
            .collect();
        Graph::from_topology(&Topology { switches: vec![], links }).unwrap()
    }
    fn node(graph: &Graph, name: &str) -> NodeIndex {
        graph.node_index(name).unwrap()
    }

    #[test]
    fn test_dijkstra_case1() {
        let graph = graph(vec![
            ("0", "1", 30.0), ("1", "2", 20.0), ("0", "2", 02.0),
        ]);
        let mut dijkstra = Dijkstra::default();
        dijkstra.compute(&graph, &MetricWeight::new(Metric::Delay), node(&graph, "0"));
        let path = dijkstra.shortest_path(node(&graph, "1")).unwrap();
        assert_eq!(graph.names(&path), vec!["0", "2", "1"]);
        assert_eq!(dijkstra.distance(node(&graph, "1")), Some(22.0));
    }
    #[test]
    fn test_dijkstra_case2() {
        let graph = graph(vec![
            ("0", "1", 10.0), ("1", "2", 20.0), ("0", "2", 02.0), ("1", "3", 10.0),
            ("0", "3", 03.0), ("3", "4", 03.0), ("5", "6", 1.0),
        ]);
        let weight = MetricWeight::new(Metric::Delay);
        let mut dijkstra = Dijkstra::default();
        dijkstra.compute(&graph, &weight, node(&graph, "2"));
        let path = dijkstra.shortest_path(node(&graph, "4")).unwrap();
        assert_eq!(graph.names(&path), vec!["2", "0", "3", "4"]);
        let path = dijkstra.shortest_path(node(&graph, "2")).unwrap();
        assert_eq!(graph.names(&path), vec!["2"]);
        assert_eq!(dijkstra.shortest_path(node(&graph, "5")), None);
    }
    #[test]
    fn test_dijkstra_ignores() {
        let graph = graph(vec![
            ("0", "1", 1.0), ("1", "2", 1.0), ("0", "2", 5.0),
        ]);
        let (n0, n1, n2) = (node(&graph, "0"), node(&graph, "1"), node(&graph, "2"));
        let mut dijkstra = Dijkstra::default();
        dijkstra.ignore(Some(n1).into_iter().collect(), Default::default());
        dijkstra.compute(&graph, &MetricWeight::new(Metric::Delay), n0);
        assert_eq!(dijkstra.shortest_path(n2), Some(vec![n0, n2]));
        dijkstra.ignore(Default::default(), Some((n0, n2)).into_iter().collect());
        dijkstra.compute(&graph, &MetricWeight::new(Metric::Delay), n0);
        assert_eq!(dijkstra.shortest_path(n2), Some(vec![n0, n1, n2]));
    }
}
