pub mod engine;
pub mod forest;
pub mod index;

pub use engine::{extract_groups, group_rows, Group, GroupKey, Grouping};
pub use forest::Forest;
pub use index::{ColumnEntry, ColumnIndex, UnionStats};
