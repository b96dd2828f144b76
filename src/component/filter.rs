use hashbrown::{HashMap, HashSet};

use super::Route;
use crate::network::Link;


/// Link id to endpoints, taken from the last applied topology. Used to turn
/// the link ids of a query into hop pairs.
#[derive(Clone, Debug, Default)]
pub struct LinkTable {
    ends: HashMap<String, (String, String)>,
}

impl LinkTable {
    pub fn new(links: &[Link]) -> Self {
        let ends = links.iter()
            .map(|link| (link.id.clone(), (link.endpoint_a.clone(), link.endpoint_b.clone())))
            .collect();
        LinkTable { ends }
    }
    /// Endpoints of the known ids; unknown ids are skipped.
    fn resolve(&self, ids: &[String]) -> HashSet<(&str, &str)> {
        ids.iter()
            .filter_map(|id| self.ends.get(id))
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect()
    }
}

fn walked<'a>(route: &'a Route, ends: &HashSet<(&str, &str)>) -> HashSet<(&'a str, &'a str)> {
    route.links()
        .filter_map(|(a, b)| {
            if ends.contains(&(a, b)) { Some((a, b)) }
            else if ends.contains(&(b, a)) { Some((b, a)) }
            else { None }
        })
        .collect()
}

/// Keeps routes whose cost is at most `max_cost`. Routes without a cost are
/// kept.
pub fn filter_le_cost(routes: Vec<Route>, max_cost: Option<f64>) -> Vec<Route> {
    match max_cost {
        Some(max) => routes.into_iter()
            .filter(|route| route.cost.map_or(true, |cost| cost <= max))
            .collect(),
        None => routes,
    }
}

/// Drops every route walking ANY of the undesired links, in either direction.
pub fn filter_undesired_links(routes: Vec<Route>, table: &LinkTable, undesired: &[String])
    -> Vec<Route> {
    let ends = table.resolve(undesired);
    if ends.is_empty() {
        return routes;
    }
    routes.into_iter()
        .filter(|route| walked(route, &ends).is_empty())
        .collect()
}

/// Keeps only routes walking ALL of the desired links that the table knows.
/// If none of the ids is known no route can satisfy them.
pub fn filter_desired_links(routes: Vec<Route>, table: &LinkTable, desired: &[String])
    -> Vec<Route> {
    if desired.is_empty() {
        return routes;
    }
    let ends = table.resolve(desired);
    if ends.is_empty() {
        return vec![];
    }
    routes.into_iter()
        .filter(|route| walked(route, &ends).len() == ends.len())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn route(hops: &[&str], cost: f64) -> Route {
        let mut route = Route::new(hops.iter().map(|&h| h.to_owned()).collect());
        route.cost = Some(cost);
        route
    }
    fn table() -> LinkTable {
        LinkTable::new(&[
            Link { id: "L1".into(), ..Link::new("S1:1", "S2:1") },
            Link { id: "L2".into(), ..Link::new("S2:2", "S3:1") },
            Link { id: "L3".into(), ..Link::new("S1:2", "S3:2") },
        ])
    }
    fn routes() -> Vec<Route> {
        vec![
            route(&["S1", "S1:1", "S2:1", "S2", "S2:2", "S3:1", "S3"], 6.0),
            route(&["S1", "S1:2", "S3:2", "S3"], 3.0),
        ]
    }
    fn firsts(routes: &[Route]) -> Vec<&str> {
        routes.iter().map(|r| r.hops[1].as_str()).collect()
    }

    #[test]
    fn it_filters_by_cost() {
        assert_eq!(filter_le_cost(routes(), Some(5.0)).len(), 1);
        assert_eq!(filter_le_cost(routes(), Some(6.0)).len(), 2);
        assert_eq!(filter_le_cost(routes(), None).len(), 2);
    }
    #[test]
    fn it_drops_undesired_links() {
        let table = table();
        let kept = filter_undesired_links(routes(), &table, &["L2".into()]);
        assert_eq!(firsts(&kept), vec!["S1:2"]);
        let kept = filter_undesired_links(routes(), &table, &["L2".into(), "L3".into()]);
        assert!(kept.is_empty());
        let kept = filter_undesired_links(routes(), &table, &["L9".into()]);
        assert_eq!(kept.len(), 2);
    }
    #[test]
    fn it_keeps_desired_links() {
        let table = table();
        let kept = filter_desired_links(routes(), &table, &["L1".into(), "L2".into()]);
        assert_eq!(firsts(&kept), vec!["S1:1"]);
        let kept = filter_desired_links(routes(), &table, &["L1".into(), "L3".into()]);
        assert!(kept.is_empty());
        let kept = filter_desired_links(routes(), &table, &["L9".into()]);
        assert!(kept.is_empty());
        let kept = filter_desired_links(routes(), &table, &[]);
        assert_eq!(kept.len(), 2);
    }
    #[test]
    fn it_matches_links_in_reverse() {
        let table = table();
        let reversed = vec![route(&["S3", "S3:1", "S2:2", "S2"], 2.0)];
        assert_eq!(filter_desired_links(reversed.clone(), &table, &["L2".into()]).len(), 1);
        assert!(filter_undesired_links(reversed, &table, &["L2".into()]).is_empty());
    }
}
