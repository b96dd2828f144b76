use enum_dispatch::enum_dispatch;

use crate::network::{Metric, MetricValue, Metrics};


/// Every edge costs one, so paths are ranked by hop count.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HopCount;

/// Cost read from an edge metric, one when the edge has no usable value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MetricWeight {
    metric: Metric,
}

#[enum_dispatch]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Weigher {
    HopCount,
    MetricWeight,
}

/// Cost of walking the edge between `u` and `v`. Must be positive.
#[enum_dispatch(Weigher)]
pub trait EdgeWeight {
    fn weight(&self, u: &str, v: &str, metrics: &Metrics) -> f64;
}


impl EdgeWeight for HopCount {
    fn weight(&self, _u: &str, _v: &str, _metrics: &Metrics) -> f64 {
        1.0
    }
}

impl MetricWeight {
    pub fn new(metric: Metric) -> Self {
        MetricWeight { metric }
    }
}

impl EdgeWeight for MetricWeight {
    fn weight(&self, _u: &str, _v: &str, metrics: &Metrics) -> f64 {
        match metrics.get(&self.metric).and_then(MetricValue::as_number) {
            Some(cost) if cost > 0.0 => cost,
            _ => 1.0,
        }
    }
}

impl<F> EdgeWeight for F where F: Fn(&str, &str, &Metrics) -> f64 {
    fn weight(&self, u: &str, v: &str, metrics: &Metrics) -> f64 {
        self(u, v, metrics)
    }
}

impl Weigher {
    /// Attributes a path search may be ranked by.
    pub const ATTRIBUTES: [&'static str; 3] = ["hop", "delay", "priority"];

    pub fn from_attribute(name: &str) -> Option<Weigher> {
        match name {
            "hop" => Some(HopCount.into()),
            "delay" => Some(MetricWeight::new(Metric::Delay).into()),
            "priority" => Some(MetricWeight::new(Metric::Priority).into()),
            _ => None,
        }
    }
    pub fn attribute(&self) -> &'static str {
        match self {
            Weigher::HopCount(_) => "hop",
            Weigher::MetricWeight(w) => w.metric.name(),
        }
    }
}

impl Default for Weigher {
    fn default() -> Self {
        HopCount.into()
    }
}
