pub mod aggregate;
pub mod fetch;

pub use aggregate::ItemQuery;
pub use fetch::{BoardFetcher, filter_by_user};
