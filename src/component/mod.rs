mod query;
mod route;

pub mod filter;

pub use filter::LinkTable;
pub use query::Query;
pub use route::{PathEntry, Route};
