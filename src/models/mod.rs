pub mod config;
pub mod date_map;

pub use config::{EvalDateConfig, StoreKind, VariableNames};
pub use date_map::{is_date_string, DateMap};
