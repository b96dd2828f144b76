use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::error::{Error, Result};


/// Link metrics understood by the graph. Metadata keys outside this set are
/// dropped on ingest and constraints on them filter nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Ownership,
    Bandwidth,
    Reliability,
    Priority,
    Utilization,
    Delay,
}

/// Threshold semantics of a metric.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// edge value <= target, lower is better
    AtMost,
    /// edge value >= target, higher is better
    AtLeast,
    /// target is one of the labels carried by the edge
    Membership,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Labels(BTreeSet<String>),
    Table(BTreeMap<String, serde_json::Value>),
}

pub type Metrics = BTreeMap<Metric, MetricValue>;


impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Ownership, Metric::Bandwidth, Metric::Reliability,
        Metric::Priority, Metric::Utilization, Metric::Delay,
    ];
    pub fn name(self) -> &'static str {
        match self {
            Metric::Ownership => "ownership",
            Metric::Bandwidth => "bandwidth",
            Metric::Reliability => "reliability",
            Metric::Priority => "priority",
            Metric::Utilization => "utilization",
            Metric::Delay => "delay",
        }
    }
    pub fn classify(name: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.name() == name)
    }
    pub fn predicate(self) -> Predicate {
        match self {
            Metric::Ownership => Predicate::Membership,
            Metric::Bandwidth | Metric::Reliability => Predicate::AtLeast,
            Metric::Priority | Metric::Utilization | Metric::Delay => Predicate::AtMost,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;
    fn from_str(name: &str) -> Result<Self> {
        Metric::classify(name)
            .ok_or_else(|| Error::type_kind("metric name", "known metric", name))
    }
}

/// Predicate registered for a metric name, or `None` for names the graph
/// does not track.
pub fn classify(name: &str) -> Option<Predicate> {
    Metric::classify(name).map(Metric::predicate)
}

impl Predicate {
    pub fn expected(self) -> &'static str {
        match self {
            Predicate::AtMost | Predicate::AtLeast => "number",
            Predicate::Membership => "string",
        }
    }
    fn accepts_target(self, target: &MetricValue) -> bool {
        match (self, target) {
            (Predicate::AtMost, MetricValue::Number(_)) => true,
            (Predicate::AtLeast, MetricValue::Number(_)) => true,
            (Predicate::Membership, MetricValue::Text(_)) => true,
            _ => false,
        }
    }
    /// An edge lacking the metric always passes.
    pub fn test(self, target: &MetricValue, edge: Option<&MetricValue>) -> bool {
        let edge = match edge {
            Some(edge) => edge,
            None => return true,
        };
        match (self, target, edge) {
            (Predicate::AtMost, MetricValue::Number(t), MetricValue::Number(v)) => v <= t,
            (Predicate::AtLeast, MetricValue::Number(t), MetricValue::Number(v)) => v >= t,
            (Predicate::Membership, MetricValue::Text(t), value) => value.contains_label(t),
            _ => false,
        }
    }
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }
    fn contains_label(&self, label: &str) -> bool {
        match self {
            MetricValue::Text(text) => text == label,
            MetricValue::Labels(labels) => labels.contains(label),
            MetricValue::Table(table) => table.contains_key(label),
            MetricValue::Number(_) => false,
        }
    }
    pub fn describe(&self) -> String {
        match self {
            MetricValue::Number(n) => format!("number {}", n),
            MetricValue::Text(s) => format!("string {:?}", s),
            MetricValue::Labels(_) => String::from("list"),
            MetricValue::Table(_) => String::from("mapping"),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_owned())
    }
}


/// A type-checked `(metric, target)` pair ready to be applied to edges.
#[derive(Clone, Debug)]
pub struct Filter {
    metric: Metric,
    predicate: Predicate,
    target: MetricValue,
}

impl Filter {
    /// `Ok(None)` for metric names the graph does not track, so such
    /// constraints pass every edge.
    pub fn new(name: &str, target: &MetricValue) -> Result<Option<Filter>> {
        let metric = match Metric::classify(name) {
            Some(metric) => metric,
            None => return Ok(None),
        };
        let predicate = metric.predicate();
        if !predicate.accepts_target(target) {
            return Err(Error::type_kind(name, predicate.expected(), target.describe()));
        }
        Ok(Some(Filter { metric, predicate, target: target.clone() }))
    }
    pub fn compile(thresholds: &Thresholds) -> Result<Vec<Filter>> {
        let mut filters = vec![];
        for (name, target) in thresholds.iter() {
            filters.extend(Filter::new(name, target)?);
        }
        Ok(filters)
    }
    pub fn metric(&self) -> Metric {
        self.metric
    }
    pub fn accepts(&self, metrics: &Metrics) -> bool {
        self.predicate.test(&self.target, metrics.get(&self.metric))
    }
}


/// Metric name to target value, kept in the order the caller gave them.
/// Names are free-form so unknown metrics survive into results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Thresholds(Vec<(String, MetricValue)>);

impl Thresholds {
    pub fn new() -> Self {
        Self::default()
    }
    /// Replaces the target of a name already present, keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, target: MetricValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = target,
            None => self.0.push((name, target)),
        }
    }
    pub fn with(mut self, name: &str, target: impl Into<MetricValue>) -> Self {
        self.insert(name, target.into());
        self
    }
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item=(&String, &MetricValue)> + '_ {
        self.0.iter().map(|(n, v)| (n, v))
    }
    pub fn entries(&self) -> &[(String, MetricValue)] {
        &self.0
    }
    /// `self` overlaid with `other`; on a shared name `other` wins.
    pub fn merged<'a>(&self, other: impl IntoIterator<Item=&'a (String, MetricValue)>) -> Self {
        let mut merged = self.clone();
        for (name, target) in other {
            merged.insert(name.clone(), target.clone());
        }
        merged
    }
}

impl Serialize for Thresholds {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, target) in self.0.iter() {
            map.serialize_entry(name, target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Thresholds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;
        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = Thresholds;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of metric names to targets")
            }
            fn visit_map<A: MapAccess<'de>>(self, mut access: A)
                -> std::result::Result<Thresholds, A::Error> {
                let mut thresholds = Thresholds::new();
                while let Some((name, target)) = access.next_entry::<String, MetricValue>()? {
                    thresholds.insert(name, target);
                }
                Ok(thresholds)
            }
        }
        deserializer.deserialize_map(OrderedVisitor)
    }
}
