use hashbrown::HashMap;
use serde_json::Value;

use super::metric::{Filter, Metric, MetricValue, Metrics};
use super::snapshot::{Link, Status, Switch, Topology};
use crate::utils::error::{Error, Result};


#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    fn new(ix: usize) -> Self {
        NodeIndex(ix)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(ix: usize) -> Self {
        NodeIndex::new(ix)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    fn new(ix: usize) -> Self {
        EdgeIndex(ix)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeIndex {
    fn from(ix: usize) -> Self {
        EdgeIndex::new(ix)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    name: String,
    edges: Vec<EdgeIndex>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    ends: (NodeIndex, NodeIndex),
    metrics: Metrics,
}

impl Node {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned(), edges: vec![] }
    }
}
impl Edge {
    pub fn new(ends: (NodeIndex, NodeIndex)) -> Self {
        Edge { ends, metrics: Metrics::new() }
    }
}


/// Read access shared by the whole graph and its edge-induced subgraphs, so
/// the search algorithms run on either.
pub trait Adjacency {
    fn network(&self) -> &Graph;
    fn contains(&self, node: NodeIndex) -> bool;
    fn incidents(&self, node: NodeIndex) -> &[EdgeIndex];
}

/// Undirected graph of devices and interfaces. Device to interface edges
/// carry no metrics; interface to interface edges carry link metadata.
/// Nodes are never removed one by one, only by `clear` or a rebuild.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    names: HashMap<String, NodeIndex>,
    lookup: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
}

fn unordered(a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Graph {
    pub fn new() -> Self {
        Self { ..Default::default() }
    }
    pub fn from_topology(topology: &Topology) -> Result<Self> {
        let mut graph = Graph::new();
        graph.add_nodes(&topology.switches)?;
        graph.add_links(&topology.links)?;
        Ok(graph)
    }
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.names.clear();
        self.lookup.clear();
    }
    /// Replaces the whole graph. On error `self` is left untouched.
    pub fn rebuild_from_topology(&mut self, topology: &Topology) -> Result<()> {
        *self = Graph::from_topology(topology)?;
        Ok(())
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }
    pub fn name(&self, node: NodeIndex) -> &str {
        debug_assert!(node.index() < self.nodes.len());
        &self.nodes[node.index()].name
    }
    pub fn names(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter().map(|&n| self.name(n).to_owned()).collect()
    }
    pub fn edges(&self) -> impl Iterator<Item=EdgeIndex> {
        (0..self.edges.len()).map(EdgeIndex::new)
    }
    pub fn endpoints(&self, edge: EdgeIndex) -> (NodeIndex, NodeIndex) {
        debug_assert!(edge.index() < self.edges.len());
        self.edges[edge.index()].ends
    }
    pub fn opposite(&self, edge: EdgeIndex, node: NodeIndex) -> NodeIndex {
        let (a, b) = self.endpoints(edge);
        if a == node { b } else { a }
    }
    pub fn metrics(&self, edge: EdgeIndex) -> &Metrics {
        debug_assert!(edge.index() < self.edges.len());
        &self.edges[edge.index()].metrics
    }
    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.lookup.get(&unordered(a, b)).copied()
    }
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.names.get(name) {
            return node;
        }
        let node = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node::new(name));
        self.names.insert(name.to_owned(), node);
        node
    }
    /// Adding an edge that already exists keeps its metrics.
    pub fn add_edge(&mut self, a: &str, b: &str) -> EdgeIndex {
        let a = self.add_node(a);
        let b = self.add_node(b);
        debug_assert!(a != b);
        if let Some(edge) = self.edge_between(a, b) {
            return edge;
        }
        let edge = EdgeIndex::new(self.edges.len());
        self.edges.push(Edge::new((a, b)));
        self.nodes[a.index()].edges.push(edge);
        self.nodes[b.index()].edges.push(edge);
        self.lookup.insert(unordered(a, b), edge);
        edge
    }
    pub fn add_nodes(&mut self, switches: &[Switch]) -> Result<()> {
        for switch in switches {
            if switch.id.is_empty() {
                return Err(Error::malformed("switch", "empty id"));
            }
            if matches!(switch.status, Some(status) if status != Status::Up) {
                continue;
            }
            self.add_node(&switch.id);
            for interface in switch.interfaces.iter() {
                if interface.id.is_empty() {
                    return Err(Error::malformed(
                        format!("interface of switch {}", switch.id), "empty id"));
                }
                if interface.id == switch.id {
                    return Err(Error::malformed(
                        format!("interface {}", interface.id), "same id as its switch"));
                }
                match interface.status {
                    Some(Status::Up) => { self.add_edge(&switch.id, &interface.id); },
                    Some(_) => continue,
                    None => return Err(Error::malformed(
                        format!("interface {}", interface.id), "missing status")),
                }
            }
        }
        Ok(())
    }
    pub fn add_links(&mut self, links: &[Link]) -> Result<()> {
        for link in links {
            let (a, b) = link.ends();
            if a.is_empty() || b.is_empty() || a == b {
                return Err(Error::malformed(
                    format!("link {}", link.id), format!("bad endpoints ({:?}, {:?})", a, b)));
            }
            match link.status {
                Some(Status::Up) => {
                    let metrics = recognized(link)?;
                    let edge = self.add_edge(a, b);
                    self.edges[edge.index()].metrics = metrics;
                },
                Some(_) => continue,
                None => return Err(Error::malformed(
                    format!("link {}", link.id), "missing status")),
            }
        }
        Ok(())
    }
    /// Overwrites each recognized metric the link carries; metrics it does
    /// not mention keep their value. Returns `false` without touching
    /// anything when the edge is not in the graph.
    pub fn update_link_metadata(&mut self, link: &Link) -> Result<bool> {
        let metrics = recognized(link)?;
        let (a, b) = link.ends();
        let edge = match (self.node_index(a), self.node_index(b)) {
            (Some(a), Some(b)) => self.edge_between(a, b),
            _ => None,
        };
        match edge {
            Some(edge) => {
                self.edges[edge.index()].metrics.extend(metrics);
                Ok(true)
            },
            None => Ok(false),
        }
    }
    pub fn metadata_of(&self, a: &str, b: &str) -> Option<&Metrics> {
        let a = self.node_index(a)?;
        let b = self.node_index(b)?;
        self.edge_between(a, b).map(|edge| self.metrics(edge))
    }
    /// Edges passing every filter, in insertion order.
    pub fn filtered_edges(&self, filters: &[Filter]) -> Vec<EdgeIndex> {
        self.edges()
            .filter(|&e| filters.iter().all(|f| f.accepts(self.metrics(e))))
            .collect()
    }
    pub fn edge_subgraph(&self, edges: &[EdgeIndex]) -> EdgeSubgraph<'_> {
        EdgeSubgraph::new(self, edges)
    }
}

impl Adjacency for Graph {
    fn network(&self) -> &Graph {
        self
    }
    fn contains(&self, node: NodeIndex) -> bool {
        node.index() < self.nodes.len()
    }
    fn incidents(&self, node: NodeIndex) -> &[EdgeIndex] {
        debug_assert!(node.index() < self.nodes.len());
        &self.nodes[node.index()].edges
    }
}

/// Recognized metrics of a link. Other keys are dropped whatever their value;
/// a recognized key holding a value no predicate can use rejects the link.
fn recognized(link: &Link) -> Result<Metrics> {
    let mut metrics = Metrics::new();
    for (key, value) in link.metadata.iter() {
        let metric = match Metric::classify(key) {
            Some(metric) => metric,
            None => continue,
        };
        let value = serde_json::from_value::<MetricValue>(value.clone())
            .map_err(|_| unusable(link, key, value))?;
        metrics.insert(metric, value);
    }
    Ok(metrics)
}

fn unusable(link: &Link, key: &str, value: &Value) -> Error {
    Error::malformed(format!("link {}", link.id), format!("unusable {} value {}", key, value))
}


/// View of a graph restricted to a set of edges and their endpoints. Only the
/// adjacency lists are rebuilt; node and edge data stay in the parent graph.
pub struct EdgeSubgraph<'a> {
    graph: &'a Graph,
    adjacency: HashMap<NodeIndex, Vec<EdgeIndex>>,
}

impl<'a> EdgeSubgraph<'a> {
    pub fn new(graph: &'a Graph, edges: &[EdgeIndex]) -> Self {
        let mut adjacency: HashMap<NodeIndex, Vec<EdgeIndex>> = HashMap::new();
        for &edge in edges {
            let (a, b) = graph.endpoints(edge);
            adjacency.entry(a).or_default().push(edge);
            adjacency.entry(b).or_default().push(edge);
        }
        EdgeSubgraph { graph, adjacency }
    }
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

impl Adjacency for EdgeSubgraph<'_> {
    fn network(&self) -> &Graph {
        self.graph
    }
    fn contains(&self, node: NodeIndex) -> bool {
        self.adjacency.contains_key(&node)
    }
    fn incidents(&self, node: NodeIndex) -> &[EdgeIndex] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}


/// A switch id is a datapath id: exactly eight colon separated hex fields.
/// Interface ids append a port field to it.
pub fn is_device_id(id: &str) -> bool {
    let fields: Vec<&str> = id.split(':').collect();
    fields.len() == 8 && fields.iter()
        .all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_hexdigit()))
}

pub fn strip_device_hops(hops: &[String]) -> Vec<String> {
    hops.iter()
        .filter(|hop| !is_device_id(hop))
        .cloned()
        .collect()
}
