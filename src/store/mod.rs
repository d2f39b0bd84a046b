//! Environment Persistence Module
//!
//! Persisted variables must outlive the current process so that jobs spawned
//! later see them. The running process's own environment is never modified.
//!
//! Backends:
//! - `SetxStore`: Windows user environment through `setx`
//! - `FileStore`: `env.toml` table plus a sourceable `env.sh`
//! - `MemoryStore`: in-process map for tests and dry runs

mod file;
mod memory;
mod setx;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use setx::SetxStore;

use crate::error::EvalDateResult;

/// Key/value store for persisted environment variables
pub trait EnvStore {
    /// Read a persisted variable
    fn get(&self, name: &str) -> Option<String>;

    /// Persist a variable for future process environments
    ///
    /// Setting the same value twice leaves the same observable state.
    fn set(&mut self, name: &str, value: &str) -> EvalDateResult<()>;

    /// Human-readable location of the store
    fn describe(&self) -> String;
}
