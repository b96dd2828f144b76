mod base;
mod constrained;
mod cost;
mod shortest_path;
mod weight;

pub use constrained::constrained_k_shortest_paths;
pub use cost::{build_cost, path_cost};
pub use shortest_path::{k_shortest_paths, weighted_k_shortest_paths};
pub use weight::{EdgeWeight, HopCount, MetricWeight, Weigher};
