use serde::{Deserialize, Serialize};

use crate::algorithm::Weigher;
use crate::network::Thresholds;
use crate::utils::config::Config;
use crate::utils::error::{Error, Result};


/// A path request as a collaborator hands it over. Unset fields fall back
/// to the configured defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Query {
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub spf_attribute: Option<String>,
    #[serde(default)]
    pub spf_max_paths: Option<usize>,
    #[serde(default)]
    pub spf_max_path_cost: Option<f64>,
    #[serde(default)]
    pub mandatory_metrics: Thresholds,
    #[serde(default)]
    pub flexible_metrics: Thresholds,
    #[serde(default)]
    pub minimum_flexible_hits: Option<usize>,
    #[serde(default)]
    pub desired_links: Vec<String>,
    #[serde(default)]
    pub undesired_links: Vec<String>,
}

impl Query {
    pub fn new(source: &str, destination: &str) -> Self {
        Query {
            source: source.to_owned(),
            destination: destination.to_owned(),
            ..Default::default()
        }
    }
    pub fn is_constrained(&self) -> bool {
        !self.mandatory_metrics.is_empty() || !self.flexible_metrics.is_empty()
    }
    pub fn weigher(&self, config: &Config) -> Result<Weigher> {
        let attribute = self.spf_attribute.as_deref().unwrap_or(&config.spf_attribute);
        Weigher::from_attribute(attribute).ok_or_else(|| Error::type_kind(
            "spf_attribute", "hop, delay or priority", attribute))
    }
    pub fn max_paths(&self, config: &Config) -> usize {
        self.spf_max_paths.unwrap_or(config.spf_max_paths).max(1)
    }
    pub fn max_path_cost(&self) -> Option<f64> {
        self.spf_max_path_cost.map(|cost| cost.max(1.0))
    }
}
