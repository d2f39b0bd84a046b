// evaldate - Evaluation date resolver
// Maps today's calendar date to an effective evaluation date and persists it
// for the environments of subsequently spawned batch jobs.

pub mod cli;
pub mod error;
pub mod models;
pub mod parser;
pub mod resolver;
pub mod store;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use error::{EvalDateError, EvalDateResult};
pub use models::{is_date_string, DateMap, EvalDateConfig, StoreKind, VariableNames};
pub use resolver::{Clock, FixedClock, LocalClock, Mode, Resolution, Resolver};
pub use store::{EnvStore, FileStore, MemoryStore, SetxStore};
