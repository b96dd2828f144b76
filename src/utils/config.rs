use serde::Deserialize;
use argh::FromArgs;

use crate::MAX_K;

/// Compute k shortest paths over a controller topology under link metric constraints
#[derive(FromArgs)]
pub struct Arguments {
    /// topology snapshot (yaml, or json by extension)
    #[argh(positional)]
    pub topology: String,
    /// path query (yaml)
    #[argh(positional)]
    pub query: String,
    /// path to configuration file
    #[argh(option, short='c', default="String::from(\"data/config/default.yaml\")")]
    pub config: String,
    /// override attribute the paths are ranked by: hop, delay or priority
    #[argh(option, short='a')]
    pub attribute: Option<String>,
    /// override the number of paths returned per search
    #[argh(option, short='k')]
    pub max_paths: Option<usize>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub name: String,
    pub spf_attribute: String,
    pub spf_max_paths: usize,
    pub default_weight: f64,
    pub strip_device_hops: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: String::from("default"),
            spf_attribute: String::from("hop"),
            spf_max_paths: 2,
            default_weight: 1.0,
            strip_device_hops: false,
            log_level: String::from("info"),
        }
    }
}

impl Config {
    pub fn override_from_args(&mut self, args: &Arguments) {
        if let Some(attribute) = &args.attribute {
            self.spf_attribute = attribute.clone();
        }
        if let Some(max_paths) = args.max_paths {
            self.spf_max_paths = num::clamp(max_paths, 1, MAX_K);
        }
    }
}
