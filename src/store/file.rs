use super::EnvStore;
use crate::error::{EvalDateError, EvalDateResult};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const TABLE_FILE: &str = "env.toml";
const SHELL_FILE: &str = "env.sh";

/// File-backed variable store
///
/// `env.toml` is the source of truth. `env.sh` is regenerated on every write
/// with one `export` line per variable so login shells can `source` it.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn table_path(&self) -> PathBuf {
        self.dir.join(TABLE_FILE)
    }

    pub fn shell_path(&self) -> PathBuf {
        self.dir.join(SHELL_FILE)
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, String> {
        let path = self.table_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> std::io::Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn write_files(&self, table: &BTreeMap<String, String>) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let toml = toml::to_string(table)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.write_atomic(&self.table_path(), &toml)?;
        self.write_atomic(&self.shell_path(), &render_shell(table))?;
        Ok(())
    }
}

impl EnvStore for FileStore {
    fn get(&self, name: &str) -> Option<String> {
        // An unreadable table falls through to the process environment
        self.read_table()
            .ok()
            .and_then(|mut table| table.remove(name))
            .or_else(|| std::env::var(name).ok())
    }

    fn set(&mut self, name: &str, value: &str) -> EvalDateResult<()> {
        let mut table = self
            .read_table()
            .map_err(|message| EvalDateError::persistence(name, 1, message))?;
        table.insert(name.to_string(), value.to_string());

        self.write_files(&table).map_err(|e| {
            EvalDateError::persistence(
                name,
                e.raw_os_error().unwrap_or(1),
                format!("Failed to write {}: {}", self.dir.display(), e),
            )
        })
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Render `export NAME='value'` lines, single-quote escaped
fn render_shell(table: &BTreeMap<String, String>) -> String {
    let mut out = String::from("# Generated by evaldate. Source this file from your shell profile.\n");
    for (name, value) in table {
        out.push_str(&format!("export {}={}\n", name, shell_quote(value)));
    }
    out
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
