use std::sync::{Mutex, MutexGuard};

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::algorithm::{self, EdgeWeight};
use crate::component::filter::{filter_desired_links, filter_le_cost, filter_undesired_links};
use crate::component::{LinkTable, PathEntry, Query, Route};
use crate::network::{Graph, Link, Metrics, Path, Thresholds, Topology};
use crate::utils::config::Config;
use crate::utils::error::{Error, Result};

/// Logical time stamped on topology and link events by the event source.
pub type Timestamp = u64;

/// What an ingest call did to the graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// Not newer than what was last applied for the same scope; ignored.
    Stale,
    /// The link has no edge in the graph. Nothing changed and a fresh
    /// topology snapshot should be fetched to reconcile.
    Missing,
}

#[derive(Default)]
struct State {
    graph: Graph,
    links: LinkTable,
    topology_updated_at: Option<Timestamp>,
    links_updated_at: HashMap<String, Timestamp>,
}

/// Path computation service over the live topology graph.
///
/// Every ingest and every search holds the same lock from start to end, so
/// a search never sees a half rebuilt graph.
pub struct PathFinder {
    state: Mutex<State>,
    config: Config,
}


impl PathFinder {
    pub fn new(config: Config) -> Self {
        PathFinder { state: Mutex::new(State::default()), config }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state.lock()
            .map_err(|_| Error::Internal(String::from("topology lock poisoned")))
    }
    /// Rebuilds the graph from a full snapshot unless a snapshot at least as
    /// new was applied already. A malformed snapshot leaves the previous
    /// graph in place.
    pub fn apply_topology_snapshot(&self, topology: &Topology, timestamp: Timestamp)
        -> Result<Applied> {
        let mut state = self.lock()?;
        if matches!(state.topology_updated_at, Some(last) if timestamp <= last) {
            debug!(timestamp, "discarded stale topology snapshot");
            return Ok(Applied::Stale);
        }
        state.graph.rebuild_from_topology(topology)?;
        state.links = LinkTable::new(&topology.links);
        state.topology_updated_at = Some(timestamp);
        debug!(timestamp, switches = topology.switches.len(), links = topology.links.len(),
               "topology graph updated");
        Ok(Applied::Updated)
    }
    pub fn apply_link_metadata_change(&self, link: &Link, timestamp: Timestamp)
        -> Result<Applied> {
        if link.id.is_empty() {
            return Err(Error::malformed("link", "empty id"));
        }
        let mut state = self.lock()?;
        if matches!(state.links_updated_at.get(&link.id), Some(&last) if timestamp <= last) {
            debug!(link = %link.id, timestamp, "discarded stale link metadata");
            return Ok(Applied::Stale);
        }
        if !state.graph.update_link_metadata(link)? {
            warn!(link = %link.id, "link metadata changed for a link missing from the graph, \
                  topology needs reconciliation");
            return Ok(Applied::Missing);
        }
        state.links_updated_at.insert(link.id.clone(), timestamp);
        debug!(link = %link.id, metadata = ?link.metadata, "topology graph updated link metadata");
        Ok(Applied::Updated)
    }
    /// Forgets the graph, the link table and every clock, so the next
    /// snapshot applies whatever its timestamp.
    pub fn clear(&self) -> Result<()> {
        *self.lock()? = State::default();
        debug!("topology graph cleared");
        Ok(())
    }
    /// Copy of the current graph.
    pub fn graph(&self) -> Result<Graph> {
        Ok(self.lock()?.graph.clone())
    }
    pub fn metadata_of(&self, a: &str, b: &str) -> Result<Option<Metrics>> {
        Ok(self.lock()?.graph.metadata_of(a, b).cloned())
    }
    pub fn k_shortest_paths<W>(&self, src: &str, dst: &str, weight: &W, k: usize)
        -> Result<Vec<Path>>
    where W: EdgeWeight + ?Sized {
        let state = self.lock()?;
        Ok(algorithm::k_shortest_paths(&state.graph, src, dst, weight, k))
    }
    pub fn constrained_k_shortest_paths<W>(&self, src: &str, dst: &str, weight: &W, k: usize,
                                           mandatory: &Thresholds, flexible: &Thresholds,
                                           minimum_hits: Option<usize>) -> Result<Vec<Route>>
    where W: EdgeWeight + ?Sized {
        let state = self.lock()?;
        algorithm::constrained_k_shortest_paths(
            &state.graph, src, dst, weight, k, mandatory, flexible, minimum_hits)
    }
    pub fn build_cost<I>(&self, paths: I, weight: &str) -> Result<Vec<Route>>
    where I: IntoIterator, I::Item: Into<PathEntry> {
        let state = self.lock()?;
        algorithm::build_cost(&state.graph, paths, weight, self.config.default_weight)
    }
    /// Answers a full path query: search, cost, then the cost and link
    /// filters the query asks for.
    pub fn find_paths(&self, query: &Query) -> Result<Vec<Route>> {
        let weigher = query.weigher(&self.config)?;
        let k = query.max_paths(&self.config);
        let state = self.lock()?;
        let graph = &state.graph;

        let routes = if query.is_constrained() {
            algorithm::constrained_k_shortest_paths(
                graph, &query.source, &query.destination, &weigher, k,
                &query.mandatory_metrics, &query.flexible_metrics, query.minimum_flexible_hits)?
        } else {
            algorithm::k_shortest_paths(graph, &query.source, &query.destination, &weigher, k)
                .into_iter()
                .map(Route::new)
                .collect()
        };
        let routes = algorithm::build_cost(
            graph, routes, weigher.attribute(), self.config.default_weight)?;
        debug!(source = %query.source, destination = %query.destination,
               found = routes.len(), "found paths");

        let routes = filter_le_cost(routes, query.max_path_cost());
        let routes = filter_undesired_links(routes, &state.links, &query.undesired_links);
        let mut routes = filter_desired_links(routes, &state.links, &query.desired_links);
        drop(state);
        debug!(kept = routes.len(), "filtered paths");

        if self.config.strip_device_hops {
            routes.iter_mut().for_each(Route::strip_device_hops);
        }
        Ok(routes)
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        PathFinder::new(Config::default())
    }
}
