pub mod config;
pub mod export;
pub mod load;
pub mod process;
pub mod query;

pub use config::LayoutConfig;
pub use process::{normalize_table, ColumnPair, NormalizedRecord, RawTable};
pub use query::{RecordSet, Selection};
