//! Traversal of the leaderboard pages: listings, athlete pages and filter menus.

mod athlete;
mod filters;
mod pagination;
mod selectors;
mod table;

pub use athlete::AthleteTableCollector;
pub use filters::FilterCollector;
pub use pagination::{PaginationConfig, ResultsPaginator};
pub use selectors::FilterSelectors;
