use crate::error::EvalDateResult;
use crate::models::{EvalDateConfig, StoreKind, VariableNames};
use crate::parser::SkippedEntry;
use crate::resolver::{Clock, Mode, Resolution, Resolver};
use crate::store::{EnvStore, FileStore, SetxStore};
use crate::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Build the mode from already-validated flags
///
/// clap rejects `--update-date-map` together with `--date`, so at most one is set.
pub fn build_mode(update_date_map: Option<PathBuf>, date: Option<String>) -> Mode {
    match (update_date_map, date) {
        (Some(json_path), _) => Mode::UpdateMap { json_path },
        (None, Some(date)) => Mode::Override { date },
        (None, None) => Mode::DailyLookup,
    }
}

/// Open the configured store, with an optional command-line override
pub fn open_store(
    config: &EvalDateConfig,
    override_kind: Option<StoreKind>,
) -> Result<Box<dyn EnvStore>> {
    let kind = override_kind.unwrap_or(config.store).resolve();
    let store: Box<dyn EnvStore> = match kind {
        StoreKind::Setx => Box::new(SetxStore::new()),
        StoreKind::File | StoreKind::Auto => Box::new(FileStore::new(config.resolved_store_dir()?)),
    };
    Ok(store)
}

/// Run one mode and report progress on the console
pub fn run(
    mode: &Mode,
    store: &mut dyn EnvStore,
    clock: &dyn Clock,
    names: &VariableNames,
    quiet: bool,
) -> EvalDateResult<Resolution> {
    if !quiet {
        match mode {
            Mode::UpdateMap { json_path } => println!(
                "{}",
                format!("📥 Loading new date map from: {}", json_path.display()).cyan()
            ),
            Mode::Override { date } => {
                println!("{}", format!("✏️  Setting {} = {}", names.evaluation_date, date).cyan())
            }
            Mode::DailyLookup => {}
        }
    }

    let store_location = store.describe();
    let warn_skipped = |entry: &SkippedEntry| {
        eprintln!("{}", format!("⚠️  Skipping invalid pair: {}", entry).yellow());
    };
    let resolution = Resolver::new(store, clock)
        .with_names(names.clone())
        .with_skip_reporter(&warn_skipped)
        .resolve(mode)?;

    if !quiet {
        report(&resolution, names, &store_location);
    }

    Ok(resolution)
}

fn report(resolution: &Resolution, names: &VariableNames, store_location: &str) {
    match resolution {
        Resolution::MapUpdated {
            encoded, entries, ..
        } => {
            println!("   New {} value ({} entries):", names.date_map, entries);
            println!("   {}", encoded);
            if *entries == 0 {
                println!(
                    "{}",
                    format!("⚠️  {} is now empty; daily lookups will fail", names.date_map)
                        .yellow()
                );
            }
            println!(
                "{}",
                format!("✅ {} updated successfully.", names.date_map).green()
            );
        }
        Resolution::DateOverridden { .. } => {
            println!("{}", "✅ Done.".green());
        }
        Resolution::DateResolved { today, date } => {
            println!(
                "{}",
                format!("📅 Today: {}, {} → {}", today, names.evaluation_date, date).cyan()
            );
            println!("{}", "✅ Done.".green());
        }
    }

    println!("   Store: {}", store_location.bright_black());
    println!(
        "{}",
        format!(
            "💡 Open a new shell to see {}.",
            resolution.variable(names)
        )
        .yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::FixedClock;
    use crate::store::MemoryStore;
    use tempfile::TempDir;

    #[test]
    fn test_build_mode() {
        assert_eq!(build_mode(None, None), Mode::DailyLookup);
        assert_eq!(
            build_mode(None, Some("20251128".to_string())),
            Mode::Override {
                date: "20251128".to_string()
            }
        );
        assert_eq!(
            build_mode(Some(PathBuf::from("map.json")), None),
            Mode::UpdateMap {
                json_path: PathBuf::from("map.json")
            }
        );
    }

    #[test]
    fn test_open_file_store_from_config() {
        let temp = TempDir::new().unwrap();
        let config = EvalDateConfig {
            store: StoreKind::File,
            store_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let store = open_store(&config, None).unwrap();
        assert_eq!(store.describe(), temp.path().display().to_string());
    }

    #[test]
    fn test_store_override_wins() {
        let config = EvalDateConfig {
            store: StoreKind::File,
            store_dir: Some(PathBuf::from("/unused")),
            ..Default::default()
        };
        let store = open_store(&config, Some(StoreKind::Setx)).unwrap();
        assert!(store.describe().contains("setx"));
    }

    #[test]
    fn test_run_quiet_returns_resolution() {
        let mut store = MemoryStore::new().with_var("date_map", "20251201=20251128");
        let clock = FixedClock::parse("20251201").unwrap();
        let resolution = run(
            &Mode::DailyLookup,
            &mut store,
            &clock,
            &VariableNames::default(),
            true,
        )
        .unwrap();
        assert_eq!(resolution.value(), "20251128");
    }
}
