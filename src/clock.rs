//! Calendar source for dating solve records

use chrono::{NaiveDate, Utc};

/// Where "today" comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Current UTC date
    #[default]
    System,
    /// A fixed date, for tests
    Fixed(NaiveDate),
}

impl Clock {
    /// Today's date according to this clock
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}
