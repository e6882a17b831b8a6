pub mod filter;
pub mod sort;
pub mod stats;

pub use filter::{FilterCategory, FilterCriteria, SmartFilter};
pub use sort::SortKey;
