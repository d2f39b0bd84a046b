use chrono::{Local, NaiveDate};

/// `YYYYMMDD`, the format of every key and value in a date map
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;

    /// Today as a `YYYYMMDD` key
    fn today_key(&self) -> String {
        self.today().format(DATE_FORMAT).to_string()
    }
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Parse a `YYYYMMDD` calendar date
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
