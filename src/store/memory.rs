use super::EnvStore;
use crate::error::{EvalDateError, EvalDateResult};
use std::collections::HashMap;

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    vars: HashMap<String, String>,
    failure: Option<(i32, String)>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a variable
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Make every subsequent `set` fail with the given host code and message
    pub fn fail_with(mut self, exit_code: i32, message: impl Into<String>) -> Self {
        self.failure = Some((exit_code, message.into()));
        self
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl EnvStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> EvalDateResult<()> {
        if let Some((exit_code, message)) = &self.failure {
            return Err(EvalDateError::persistence(name, *exit_code, message.clone()));
        }
        self.vars.insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
