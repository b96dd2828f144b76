use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;


#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Down,
    Disabled,
}

/// Full topology as published by the controller. Both the device and link
/// lists are applied wholesale.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub switches: Vec<Switch>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Switch {
    pub id: String,
    /// Switches without a status are taken as up.
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Interface {
    pub id: String,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub endpoint_a: String,
    pub endpoint_b: String,
    #[serde(default)]
    pub status: Option<Status>,
    /// Raw metadata as the controller sends it. Only recognized metrics are
    /// read into the graph.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}


impl Switch {
    pub fn new(id: &str) -> Self {
        Switch { id: id.to_owned(), status: Some(Status::Up), interfaces: vec![] }
    }
    /// Adds `count` up interfaces named `{id}:{port}`, ports counted from 1.
    pub fn with_ports(mut self, count: usize) -> Self {
        let id = &self.id;
        let first = self.interfaces.len() + 1;
        let ports: Vec<Interface> = (first..first + count)
            .map(|port| Interface::new(&format!("{}:{}", id, port)))
            .collect();
        self.interfaces.extend(ports);
        self
    }
}

impl Interface {
    pub fn new(id: &str) -> Self {
        Interface { id: id.to_owned(), status: Some(Status::Up) }
    }
}

impl Link {
    pub fn new(endpoint_a: &str, endpoint_b: &str) -> Self {
        Link {
            id: format!("{}-{}", endpoint_a, endpoint_b),
            endpoint_a: endpoint_a.to_owned(),
            endpoint_b: endpoint_b.to_owned(),
            status: Some(Status::Up),
            metadata: BTreeMap::new(),
        }
    }
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_owned(), value.into());
        self
    }
    pub fn ends(&self) -> (&str, &str) {
        (&self.endpoint_a, &self.endpoint_b)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_names_ports_after_switch() {
        let switch = Switch::new("S1").with_ports(2).with_ports(1);
        let ids: Vec<&str> = switch.interfaces.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["S1:1", "S1:2", "S1:3"]);
        assert!(switch.interfaces.iter().all(|i| i.status == Some(Status::Up)));
    }
    #[test]
    fn it_keeps_any_metadata_value() {
        let text = r#"{
            "id": "L1", "endpoint_a": "S1:1", "endpoint_b": "S2:1", "status": "up",
            "metadata": {"delay": 5, "active": true, "vlans": [100, 200], "note": null}
        }"#;
        let link: Link = serde_json::from_str(text).unwrap();
        assert_eq!(link.metadata.len(), 4);
        assert_eq!(link.metadata["active"], Value::Bool(true));
    }
}
