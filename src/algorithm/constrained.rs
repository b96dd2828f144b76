use itertools::Itertools;

use super::{k_shortest_paths, EdgeWeight};
use crate::component::Route;
use crate::network::{Filter, Graph, Thresholds};
use crate::utils::error::Result;


/// k shortest paths under hard (`mandatory`) and soft (`flexible`) metric
/// thresholds.
///
/// Edges failing any mandatory threshold are dropped first. The flexible
/// thresholds are then relaxed one at a time: level `i` tries every
/// combination of `F - i` of them, searching the subgraph induced by the
/// edges that pass. The first level where some combination finds a path
/// ends the search, and every path of every combination at that level is
/// returned, tagged with the thresholds enforced for it. No level below
/// `minimum_hits` active flexible thresholds (default: all of them) is tried.
///
/// Combinations at level `i` number `C(F, F - i)`, so a long flexible list
/// with a low `minimum_hits` is expensive; that cost is inherent to the
/// search and is left to the caller to bound.
pub fn constrained_k_shortest_paths<W>(
    graph: &Graph,
    src: &str,
    dst: &str,
    weight: &W,
    k: usize,
    mandatory: &Thresholds,
    flexible: &Thresholds,
    minimum_hits: Option<usize>,
) -> Result<Vec<Route>>
where W: EdgeWeight + ?Sized {
    let base = Filter::compile(mandatory)?;
    // type errors surface before any search runs
    Filter::compile(flexible)?;

    if mandatory.is_empty() && flexible.is_empty() {
        return Ok(k_shortest_paths(graph, src, dst, weight, k)
            .into_iter()
            .map(|hops| Route::constrained(hops, Thresholds::new()))
            .collect());
    }

    let first_pass = graph.filtered_edges(&base);
    let length = flexible.len();
    let minimum_hits = num::clamp(minimum_hits.unwrap_or(length), 0, length);

    let mut routes = vec![];
    for relaxed in 0..=(length - minimum_hits) {
        for combo in flexible.entries().iter().combinations(length - relaxed) {
            let active = Thresholds::new().merged(combo.iter().copied());
            let filters = Filter::compile(&active)?;
            let edges = first_pass.iter()
                .copied()
                .filter(|&e| filters.iter().all(|f| f.accepts(graph.metrics(e))))
                .collect_vec();
            let subgraph = graph.edge_subgraph(&edges);
            let metrics = mandatory.merged(active.entries());
            for hops in k_shortest_paths(&subgraph, src, dst, weight, k) {
                routes.push(Route::constrained(hops, metrics.clone()));
            }
        }
        if !routes.is_empty() {
            break;
        }
    }
    Ok(routes)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{HopCount, MetricWeight};
    use crate::network::{Link, Metric, MetricValue, Topology};
    use crate::utils::error::Error;

    fn triangle() -> Graph {
        let links = vec![
            Link::new("A", "B").with_metadata("delay", 10.0),
            Link::new("B", "C").with_metadata("delay", 5.0),
            Link::new("A", "C").with_metadata("delay", 20.0),
        ];
        Graph::from_topology(&Topology { switches: vec![], links }).unwrap()
    }
    /// Two disjoint routes from A to D: the upper one owned by B with little
    /// bandwidth, the lower one owned by C with plenty.
    fn diamond() -> Graph {
        let links = vec![
            Link::new("A", "U").with_metadata("ownership", "B").with_metadata("bandwidth", 10.0),
            Link::new("U", "D").with_metadata("ownership", "B").with_metadata("bandwidth", 10.0),
            Link::new("A", "L").with_metadata("ownership", "C").with_metadata("bandwidth", 100.0),
            Link::new("L", "D").with_metadata("ownership", "C").with_metadata("bandwidth", 100.0),
        ];
        Graph::from_topology(&Topology { switches: vec![], links }).unwrap()
    }
    fn hops(routes: &[Route]) -> Vec<Vec<&str>> {
        routes.iter().map(|r| r.hops.iter().map(String::as_str).collect()).collect()
    }

    #[test]
    fn it_drops_edges_failing_mandatory() {
        let graph = triangle();
        let delay = MetricWeight::new(Metric::Delay);
        let mandatory = Thresholds::new().with("delay", 8.0);
        let routes = constrained_k_shortest_paths(
            &graph, "A", "C", &delay, 2, &mandatory, &Thresholds::new(), None).unwrap();
        assert!(routes.is_empty());

        let mandatory = Thresholds::new().with("delay", 10.0);
        let routes = constrained_k_shortest_paths(
            &graph, "A", "C", &delay, 2, &mandatory, &Thresholds::new(), None).unwrap();
        assert_eq!(hops(&routes), vec![vec!["A", "B", "C"]]);
        assert_eq!(routes[0].metrics, Some(mandatory));
    }
    #[test]
    fn it_stops_at_first_satisfiable_level() {
        let graph = diamond();
        let flexible = Thresholds::new().with("ownership", "B").with("bandwidth", 100.0);
        let routes = constrained_k_shortest_paths(
            &graph, "A", "D", &HopCount, 2, &Thresholds::new(), &flexible, Some(0)).unwrap();
        // level 1: ownership B alone finds the upper route, bandwidth alone the lower
        assert_eq!(hops(&routes), vec![vec!["A", "U", "D"], vec!["A", "L", "D"]]);
        assert_eq!(routes[0].metrics, Some(Thresholds::new().with("ownership", "B")));
        assert_eq!(routes[1].metrics, Some(Thresholds::new().with("bandwidth", 100.0)));
    }
    #[test]
    fn it_prefers_satisfying_more_flexible_metrics() {
        let graph = diamond();
        let flexible = Thresholds::new().with("ownership", "C").with("bandwidth", 50.0);
        let routes = constrained_k_shortest_paths(
            &graph, "A", "D", &HopCount, 5, &Thresholds::new(), &flexible, Some(0)).unwrap();
        assert_eq!(hops(&routes), vec![vec!["A", "L", "D"]]);
        assert_eq!(routes[0].metrics, Some(flexible));
    }
    #[test]
    fn it_honours_minimum_hits() {
        let graph = diamond();
        let flexible = Thresholds::new().with("ownership", "Z").with("bandwidth", 500.0);
        let strict = constrained_k_shortest_paths(
            &graph, "A", "D", &HopCount, 5, &Thresholds::new(), &flexible, None).unwrap();
        assert!(strict.is_empty());
        let one = constrained_k_shortest_paths(
            &graph, "A", "D", &HopCount, 5, &Thresholds::new(), &flexible, Some(1)).unwrap();
        assert!(one.is_empty());
        let none = constrained_k_shortest_paths(
            &graph, "A", "D", &HopCount, 5, &Thresholds::new(), &flexible, Some(0)).unwrap();
        assert_eq!(none.len(), 2);
        assert!(none.iter().all(|r| r.metrics == Some(Thresholds::new())));
        // clamped to the flexible count
        let over = constrained_k_shortest_paths(
            &graph, "A", "D", &HopCount, 5, &Thresholds::new(), &flexible, Some(9)).unwrap();
        assert!(over.is_empty());
    }
    #[test]
    fn it_wraps_unconstrained_search() {
        let mut graph = triangle();
        graph.add_node("X");
        let routes = constrained_k_shortest_paths(
            &graph, "X", "X", &HopCount, 1, &Thresholds::new(), &Thresholds::new(), None).unwrap();
        assert_eq!(hops(&routes), vec![vec!["X"]]);
        assert_eq!(routes[0].metrics, Some(Thresholds::new()));
    }
    #[test]
    fn it_passes_unknown_metrics_through() {
        let graph = triangle();
        let mandatory = Thresholds::new().with("colour", "red");
        let routes = constrained_k_shortest_paths(
            &graph, "A", "C", &HopCount, 1, &mandatory, &Thresholds::new(), None).unwrap();
        assert_eq!(hops(&routes), vec![vec!["A", "C"]]);
        assert_eq!(routes[0].metrics.as_ref().unwrap().get("colour"),
                   Some(&MetricValue::Text("red".into())));
    }
    #[test]
    fn it_rejects_mistyped_targets() {
        let graph = triangle();
        let before = graph.clone();
        let mandatory = Thresholds::new().with("ownership", 1.0);
        let err = constrained_k_shortest_paths(
            &graph, "A", "C", &HopCount, 1, &mandatory, &Thresholds::new(), None).unwrap_err();
        assert!(matches!(err, Error::TypeKind { .. }));
        let flexible = Thresholds::new().with("delay", "low");
        let err = constrained_k_shortest_paths(
            &graph, "A", "C", &HopCount, 1, &Thresholds::new(), &flexible, Some(0)).unwrap_err();
        assert!(matches!(err, Error::TypeKind { .. }));
        assert_eq!(graph, before);
    }
}
