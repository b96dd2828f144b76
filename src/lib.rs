pub mod algorithm;
pub mod component;
pub mod network;
pub mod pathfinder;
pub mod utils;

pub use component::{Query, Route};
pub use network::{Graph, Link, Path, Thresholds, Topology};
pub use pathfinder::{Applied, PathFinder, Timestamp};
pub use utils::error::{Error, Result};

/// Upper bound on paths returned by a single search.
pub const MAX_K: usize = 20;
