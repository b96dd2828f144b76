use std::fs;

use serde::de::DeserializeOwned;

use super::config::Config;
use super::error::{Error, Result};
use crate::component::Query;
use crate::network::Topology;


fn load<T: DeserializeOwned>(path: &str) -> Result<T> {
    let text = fs::read_to_string(path)
        .map_err(|err| Error::Io(path.to_owned(), err))?;
    Ok(serde_yaml::from_str(&text)?)
}

pub fn load_topology(path: &str) -> Result<Topology> {
    load(path)
}

pub fn load_query(path: &str) -> Result<Query> {
    load(path)
}

pub fn load_config(path: &str) -> Result<Config> {
    load(path)
}
