//! Resolution Engine
//!
//! Decides which value to persist for one invocation. The CLI builds a
//! [`Mode`] from its arguments; the engine never sees raw arguments.

mod clock;

pub use clock::{Clock, FixedClock, LocalClock, DATE_FORMAT};

use crate::error::{EvalDateError, EvalDateResult};
use crate::models::{is_date_string, VariableNames};
use crate::parser::{decode, decode_json, encode, SkippedEntry};
use crate::store::EnvStore;
use std::path::PathBuf;

/// What an invocation should do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// Replace the persisted date map with a JSON table
    UpdateMap { json_path: PathBuf },
    /// Force the evaluation date to a literal value
    Override { date: String },
    /// Map today's date through the persisted table
    #[default]
    DailyLookup,
}

/// What was persisted
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    MapUpdated {
        encoded: String,
        entries: usize,
        skipped: Vec<SkippedEntry>,
    },
    DateOverridden {
        date: String,
    },
    DateResolved {
        today: String,
        date: String,
    },
}

impl Resolution {
    /// Variable written by this resolution
    pub fn variable<'n>(&self, names: &'n VariableNames) -> &'n str {
        match self {
            Resolution::MapUpdated { .. } => &names.date_map,
            Resolution::DateOverridden { .. } | Resolution::DateResolved { .. } => {
                &names.evaluation_date
            }
        }
    }

    /// Value written by this resolution
    pub fn value(&self) -> &str {
        match self {
            Resolution::MapUpdated { encoded, .. } => encoded,
            Resolution::DateOverridden { date } | Resolution::DateResolved { date, .. } => date,
        }
    }
}

/// Resolves a [`Mode`] against a store and a clock
pub struct Resolver<'a> {
    store: &'a mut dyn EnvStore,
    clock: &'a dyn Clock,
    names: VariableNames,
    on_skipped: Option<&'a dyn Fn(&SkippedEntry)>,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a mut dyn EnvStore, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            clock,
            names: VariableNames::default(),
            on_skipped: None,
        }
    }

    /// Use non-default variable names
    pub fn with_names(mut self, names: VariableNames) -> Self {
        self.names = names;
        self
    }

    /// Report each rejected JSON pair as soon as the table is loaded
    ///
    /// Runs before the store is written, so diagnostics survive a failed write.
    pub fn with_skip_reporter(mut self, reporter: &'a dyn Fn(&SkippedEntry)) -> Self {
        self.on_skipped = Some(reporter);
        self
    }

    /// Run one mode to completion
    pub fn resolve(&mut self, mode: &Mode) -> EvalDateResult<Resolution> {
        match mode {
            Mode::UpdateMap { json_path } => self.update_map(json_path),
            Mode::Override { date } => self.override_date(date),
            Mode::DailyLookup => self.daily_lookup(),
        }
    }

    fn update_map(&mut self, json_path: &std::path::Path) -> EvalDateResult<Resolution> {
        let decoded = decode_json(json_path)?;
        if let Some(report) = self.on_skipped {
            for entry in &decoded.skipped {
                report(entry);
            }
        }
        let encoded = encode(&decoded.map);

        self.store.set(&self.names.date_map, &encoded)?;

        Ok(Resolution::MapUpdated {
            encoded,
            entries: decoded.map.len(),
            skipped: decoded.skipped,
        })
    }

    fn override_date(&mut self, date: &str) -> EvalDateResult<Resolution> {
        if !is_date_string(date) {
            return Err(EvalDateError::InvalidDateFormat(date.to_string()));
        }

        self.store.set(&self.names.evaluation_date, date)?;

        Ok(Resolution::DateOverridden {
            date: date.to_string(),
        })
    }

    fn daily_lookup(&mut self) -> EvalDateResult<Resolution> {
        let raw = self
            .store
            .get(&self.names.date_map)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| EvalDateError::MissingConfiguration(self.names.date_map.clone()))?;

        let map = decode(&raw);
        let today = self.clock.today_key();

        let date = map
            .get(&today)
            .ok_or_else(|| EvalDateError::NoMappingForDate(today.clone()))?
            .to_string();

        self.store.set(&self.names.evaluation_date, &date)?;

        Ok(Resolution::DateResolved { today, date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn clock(y: i32, m: u32, d: u32) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_override_accepts_eight_digits() {
        let mut store = MemoryStore::new();
        let clock = clock(2025, 11, 28);
        let resolution = Resolver::new(&mut store, &clock)
            .resolve(&Mode::Override {
                date: "20251128".to_string(),
            })
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::DateOverridden {
                date: "20251128".to_string()
            }
        );
        assert_eq!(store.get("evaluation_date").as_deref(), Some("20251128"));
    }

    #[test]
    fn test_override_rejects_bad_format() {
        let mut store = MemoryStore::new();
        let clock = clock(2025, 11, 28);
        for bad in ["2025112", "202511280", "2025-11-2", "abcdefgh", ""] {
            let err = Resolver::new(&mut store, &clock)
                .resolve(&Mode::Override {
                    date: bad.to_string(),
                })
                .unwrap_err();
            assert!(matches!(err, EvalDateError::InvalidDateFormat(_)), "input: {bad}");
            assert_eq!(err.exit_code(), 2);
        }
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_override_ignores_date_map() {
        let mut store = MemoryStore::new().with_var("date_map", "20251128=20251126");
        let clock = clock(2025, 11, 28);
        Resolver::new(&mut store, &clock)
            .resolve(&Mode::Override {
                date: "20240101".to_string(),
            })
            .unwrap();
        assert_eq!(store.get("evaluation_date").as_deref(), Some("20240101"));
    }

    #[test]
    fn test_daily_lookup_resolves() {
        let mut store = MemoryStore::new().with_var("date_map", "20251128=20251126");
        let clock = clock(2025, 11, 28);
        let resolution = Resolver::new(&mut store, &clock)
            .resolve(&Mode::DailyLookup)
            .unwrap();

        assert_eq!(
            resolution,
            Resolution::DateResolved {
                today: "20251128".to_string(),
                date: "20251126".to_string(),
            }
        );
        assert_eq!(store.get("evaluation_date").as_deref(), Some("20251126"));
    }

    #[test]
    fn test_daily_lookup_missing_map() {
        let mut store = MemoryStore::new();
        let clock = clock(2025, 11, 28);
        let err = Resolver::new(&mut store, &clock)
            .resolve(&Mode::DailyLookup)
            .unwrap_err();
        assert!(matches!(err, EvalDateError::MissingConfiguration(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_daily_lookup_empty_map_counts_as_missing() {
        let mut store = MemoryStore::new().with_var("date_map", "");
        let clock = clock(2025, 11, 28);
        let err = Resolver::new(&mut store, &clock)
            .resolve(&Mode::DailyLookup)
            .unwrap_err();
        assert!(matches!(err, EvalDateError::MissingConfiguration(_)));
    }

    #[test]
    fn test_daily_lookup_blank_map_is_set_but_unmapped() {
        let mut store = MemoryStore::new().with_var("date_map", "  ");
        let clock = clock(2025, 11, 28);
        let err = Resolver::new(&mut store, &clock)
            .resolve(&Mode::DailyLookup)
            .unwrap_err();
        assert!(matches!(err, EvalDateError::NoMappingForDate(_)));
    }

    #[test]
    fn test_daily_lookup_no_entry_for_today() {
        let mut store = MemoryStore::new().with_var("date_map", "20251128=20251126");
        let clock = clock(2025, 11, 30);
        let err = Resolver::new(&mut store, &clock)
            .resolve(&Mode::DailyLookup)
            .unwrap_err();

        match &err {
            EvalDateError::NoMappingForDate(today) => assert_eq!(today, "20251130"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 3);
        assert_eq!(store.get("evaluation_date"), None);
    }

    #[test]
    fn test_daily_lookup_only_garbage_map() {
        // Set but entirely malformed: decodes to empty, so today is unmapped
        let mut store = MemoryStore::new().with_var("date_map", "junk;more=junk");
        let clock = clock(2025, 11, 28);
        let err = Resolver::new(&mut store, &clock)
            .resolve(&Mode::DailyLookup)
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_persistence_failure_propagates_code() {
        let mut store = MemoryStore::new()
            .with_var("date_map", "20251128=20251126")
            .fail_with(5, "Access is denied.");
        let clock = clock(2025, 11, 28);
        let err = Resolver::new(&mut store, &clock)
            .resolve(&Mode::DailyLookup)
            .unwrap_err();

        assert!(matches!(err, EvalDateError::Persistence { .. }));
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("Access is denied."));
    }

    #[test]
    fn test_custom_variable_names() {
        let names = VariableNames {
            date_map: "DATE_MAP".to_string(),
            evaluation_date: "EVAL_DATE".to_string(),
        };
        let mut store = MemoryStore::new().with_var("DATE_MAP", "20251128=20251126");
        let clock = clock(2025, 11, 28);
        let resolution = Resolver::new(&mut store, &clock)
            .with_names(names.clone())
            .resolve(&Mode::DailyLookup)
            .unwrap();

        assert_eq!(resolution.variable(&names), "EVAL_DATE");
        assert_eq!(resolution.value(), "20251126");
        assert_eq!(store.get("EVAL_DATE").as_deref(), Some("20251126"));
    }

    #[test]
    fn test_skipped_entries_reported_before_failed_write() {
        let temp = TempDir::new().unwrap();
        let json_path = temp.path().join("date_map.json");
        std::fs::write(&json_path, r#"{"20251201":"20251128","bad":"x"}"#).unwrap();

        let mut store = MemoryStore::new().fail_with(20, "Not a directory");
        let clock = clock(2025, 12, 1);
        let reported = RefCell::new(Vec::new());
        let reporter = |entry: &SkippedEntry| reported.borrow_mut().push(entry.to_string());

        let err = Resolver::new(&mut store, &clock)
            .with_skip_reporter(&reporter)
            .resolve(&Mode::UpdateMap { json_path })
            .unwrap_err();

        assert_eq!(err.exit_code(), 20);
        assert_eq!(reported.into_inner(), vec!["bad: x".to_string()]);
    }

    #[test]
    fn test_skip_reporter_not_called_for_clean_table() {
        let temp = TempDir::new().unwrap();
        let json_path = temp.path().join("date_map.json");
        std::fs::write(&json_path, r#"{"20251201":"20251128"}"#).unwrap();

        let mut store = MemoryStore::new();
        let clock = clock(2025, 12, 1);
        let calls = RefCell::new(0);
        let reporter = |_: &SkippedEntry| *calls.borrow_mut() += 1;

        Resolver::new(&mut store, &clock)
            .with_skip_reporter(&reporter)
            .resolve(&Mode::UpdateMap { json_path })
            .unwrap();
        assert_eq!(calls.into_inner(), 0);
    }

    #[test]
    fn test_default_mode_is_daily_lookup() {
        assert_eq!(Mode::default(), Mode::DailyLookup);
    }
}
