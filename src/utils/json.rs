use std::fs;

use super::error::{Error, Result};
use crate::component::Route;
use crate::network::Topology;


pub fn load_topology(path: &str) -> Result<Topology> {
    let text = fs::read_to_string(path)
        .map_err(|err| Error::Io(path.to_owned(), err))?;
    Ok(serde_json::from_str(&text)?)
}

/// `{"paths": [...]}`, the shape path queries are answered with.
pub fn dump_routes(routes: &[Route]) -> Result<String> {
    let body = serde_json::json!({ "paths": routes });
    Ok(serde_json::to_string_pretty(&body)?)
}
