//! Dashboard view over grievance records: filtering, ordering, and counters.

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod sort;

pub use dashboard::{DashboardStats, filter_and_sort};
pub use error::RankError;
pub use filter::{Filters, filter, submitted_by};
pub use sort::{SortKey, sort};
