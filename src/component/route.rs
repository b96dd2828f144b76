use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::network::{strip_device_hops, Path, Thresholds};
use crate::utils::error::{Error, Result};


/// One search result. `metrics` holds the thresholds actually enforced when
/// the path came out of a constrained search; `cost` is filled by the cost
/// builder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub hops: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Thresholds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Input accepted by the cost builder: a bare hop list or an existing record.
#[derive(Clone, Debug, PartialEq)]
pub enum PathEntry {
    Hops(Path),
    Record(Route),
}


impl Route {
    pub fn new(hops: Path) -> Self {
        Route { hops, metrics: None, cost: None }
    }
    pub fn constrained(hops: Path, metrics: Thresholds) -> Self {
        Route { hops, metrics: Some(metrics), cost: None }
    }
    /// Consecutive hop pairs, i.e. the edges walked.
    pub fn links(&self) -> impl Iterator<Item=(&str, &str)> + '_ {
        self.hops.windows(2).map(|ends| (ends[0].as_str(), ends[1].as_str()))
    }
    pub fn strip_device_hops(&mut self) {
        self.hops = strip_device_hops(&self.hops);
    }
}

impl PathEntry {
    pub fn into_route(self) -> Route {
        match self {
            PathEntry::Hops(hops) => Route::new(hops),
            PathEntry::Record(route) => route,
        }
    }
}

impl From<Path> for PathEntry {
    fn from(hops: Path) -> Self {
        PathEntry::Hops(hops)
    }
}

impl From<Route> for PathEntry {
    fn from(route: Route) -> Self {
        PathEntry::Record(route)
    }
}

impl TryFrom<serde_json::Value> for PathEntry {
    type Error = Error;
    fn try_from(value: serde_json::Value) -> Result<Self> {
        let rejected = |value: &serde_json::Value|
            Error::type_kind("path", "hop list or path record", value.to_string());
        match value {
            serde_json::Value::Array(_) => serde_json::from_value(value.clone())
                .map(PathEntry::Hops)
                .map_err(|_| rejected(&value)),
            serde_json::Value::Object(ref object) if object.contains_key("hops") =>
                serde_json::from_value(value.clone())
                    .map(PathEntry::Record)
                    .map_err(|_| rejected(&value)),
            other => Err(rejected(&other)),
        }
    }
}
