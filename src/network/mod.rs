mod metric;
mod snapshot;
mod topology;

pub use metric::{classify, Filter, Metric, MetricValue, Metrics, Predicate, Thresholds};
pub use snapshot::{Interface, Link, Status, Switch, Topology};
pub use topology::{is_device_id, strip_device_hops};
pub use topology::{Adjacency, EdgeIndex, EdgeSubgraph, Graph, NodeIndex};

/// Hops from source to destination, by node name.
pub type Path = Vec<String>;
