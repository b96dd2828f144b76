use crate::component::{PathEntry, Route};
use crate::network::{Graph, Metric, MetricValue};
use crate::utils::error::{Error, Result};


/// Sum of `weight` over the hops of a path. An edge without the attribute,
/// or a hop pair with no edge, adds `default_weight`.
pub fn path_cost(graph: &Graph, hops: &[String], weight: &str, default_weight: f64) -> Result<f64> {
    let metric = Metric::classify(weight);
    let mut cost = 0.0;
    for ends in hops.windows(2) {
        let value = metric.and_then(|metric| graph
            .metadata_of(&ends[0], &ends[1])
            .and_then(|metrics| metrics.get(&metric)));
        cost += match value {
            None => default_weight,
            Some(MetricValue::Number(n)) => *n,
            Some(other) => return Err(Error::type_kind(
                format!("{} of {} - {}", weight, ends[0], ends[1]), "number", other.describe())),
        };
    }
    Ok(cost)
}

/// Attaches a cost to every path, turning bare hop lists into records.
pub fn build_cost<I>(graph: &Graph, paths: I, weight: &str, default_weight: f64) -> Result<Vec<Route>>
where I: IntoIterator, I::Item: Into<PathEntry> {
    paths.into_iter()
        .map(|entry| {
            let entry: PathEntry = entry.into();
            let mut route = entry.into_route();
            route.cost = Some(path_cost(graph, &route.hops, weight, default_weight)?);
            Ok(route)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;
    use crate::network::{Link, Thresholds, Topology};

    fn graph() -> Graph {
        let links = vec![
            Link::new("A", "B").with_metadata("delay", 10.0),
            Link::new("B", "C").with_metadata("delay", 5.0).with_metadata("ownership", "X"),
            Link::new("A", "C"),
        ];
        Graph::from_topology(&Topology { switches: vec![], links }).unwrap()
    }
    fn hops(names: &[&str]) -> Vec<String> {
        names.iter().map(|&n| n.to_owned()).collect()
    }

    #[test]
    fn it_sums_metric_along_path() {
        let graph = graph();
        assert_eq!(path_cost(&graph, &hops(&["A", "B", "C"]), "delay", 1.0).unwrap(), 15.0);
        assert_eq!(path_cost(&graph, &hops(&["A", "C"]), "delay", 1.0).unwrap(), 1.0);
        assert_eq!(path_cost(&graph, &hops(&["A", "C"]), "delay", 4.0).unwrap(), 4.0);
        assert_eq!(path_cost(&graph, &hops(&["A", "B", "C"]), "hop", 1.0).unwrap(), 2.0);
        assert_eq!(path_cost(&graph, &hops(&["A", "Z"]), "delay", 1.0).unwrap(), 1.0);
        assert_eq!(path_cost(&graph, &hops(&["A"]), "delay", 1.0).unwrap(), 0.0);
    }
    #[test]
    fn it_rejects_non_numeric_weights() {
        let graph = graph();
        let err = path_cost(&graph, &hops(&["B", "C"]), "ownership", 1.0).unwrap_err();
        assert!(matches!(err, Error::TypeKind { expected: "number", .. }));
    }
    #[test]
    fn it_builds_both_shapes() {
        let graph = graph();
        let bare = build_cost(&graph, vec![hops(&["A", "B", "C"])], "delay", 1.0).unwrap();
        assert_eq!(bare, vec![Route { hops: hops(&["A", "B", "C"]), metrics: None, cost: Some(15.0) }]);

        let metrics = Thresholds::new().with("delay", 20.0);
        let record = Route::constrained(hops(&["A", "C"]), metrics.clone());
        let built = build_cost(&graph, vec![record], "delay", 1.0).unwrap();
        assert_eq!(built[0].metrics, Some(metrics));
        assert_eq!(built[0].cost, Some(1.0));
    }
    #[test]
    fn it_builds_from_wire_values() {
        let graph = graph();
        let entries = vec![
            serde_json::json!(["A", "B"]),
            serde_json::json!({"hops": ["B", "C"], "metrics": {"delay": 5}}),
        ];
        let entries: Vec<PathEntry> = entries.into_iter()
            .map(PathEntry::try_from)
            .collect::<Result<_>>()
            .unwrap();
        let built = build_cost(&graph, entries, "delay", 1.0).unwrap();
        assert_eq!(built.iter().map(|r| r.cost).collect::<Vec<_>>(), vec![Some(10.0), Some(5.0)]);
    }
}
