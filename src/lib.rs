//! Normalize dates buried in file names into a leading `yyyy-mm-dd` prefix.
//!
//! The engine is pure: [`Extractor::extract`] runs an ordered chain of
//! recognizers over a name and returns the first [`DateMatch`], and
//! [`Extractor::validate`] turns it into a [`CalendarDate`]. The [`rename`]
//! module is the thin filesystem layer on top.
//!
//! ```
//! use chrono::NaiveDate;
//! use date_prefix::{Extractor, normalize::canonical_name};
//!
//! let extractor = Extractor::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
//! let found = extractor.extract("Protokoll - 15.03.2025.docx").unwrap();
//! let date = extractor.validate(&found).unwrap();
//! assert_eq!(canonical_name(&date, &found.remainder), "2025-03-15 Protokoll.docx");
//! ```

mod chain;
mod consts;
mod date;
mod error;
pub mod logging;
pub mod normalize;
mod prelude;
pub mod rename;
mod report;
mod types;

pub use chain::{CHAIN, Extractor, Recognizer};
pub use consts::*;
pub use date::CalendarDate;
pub use error::{NameError, RenameError};
pub use rename::{Plan, RunOptions, plan_name, run};
pub use report::{Counts, DirectoryReport, FileOutcome, RunReport, SkipReason};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use serde::Serialize;

/// Why a calendar triple was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid year: {year} (must be {}-{latest})", MIN_YEAR)]
    InvalidYear { year: u16, latest: u16 },
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}

impl std::error::Error for ParseError {}

/// Component of a date that was not in the name and had to be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Inferred {
    /// Only month and year were present; the day is the first of the month.
    #[display(fmt = "day")]
    Day,
    /// Only day and month were present and no year token was found elsewhere;
    /// the year is the reference year.
    #[display(fmt = "year")]
    Year,
}

/// A date found in a file name, not yet validated against the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateMatch {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    /// The name with the date removed and separators cleaned up
    pub remainder: String,
    /// Label of the recognizer that fired
    pub pattern: &'static str,
    pub inferred: Option<Inferred>,
}

impl DateMatch {
    /// The raw triple formatted as `yyyy-mm-dd`, valid or not.
    pub fn date_prefix(&self) -> String {
        format!(
            "{:04}{sep}{:02}{sep}{:02}",
            self.year,
            self.month,
            self.day,
            sep = DATE_SEPARATOR
        )
    }

    /// Checks the triple against the Gregorian calendar and the
    /// `MIN_YEAR..=latest_year` window.
    ///
    /// # Errors
    /// Returns the first component that is out of range.
    pub fn validate(&self, latest_year: u16) -> Result<CalendarDate, ParseError> {
        CalendarDate::new(self.year, self.month, self.day, latest_year)
    }
}

/// Runs the recognizer chain against `name` using today's date as reference.
pub fn extract_date(name: &str) -> Option<DateMatch> {
    Extractor::now().extract(name)
}

/// Whether the triple is a real date between `MIN_YEAR` and the current year.
pub fn is_valid_calendar_date(year: u16, month: u8, day: u8) -> bool {
    Extractor::now().is_valid_calendar_date(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use normalize::canonical_name;

    fn extractor() -> Extractor {
        Extractor::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn normalized(name: &str) -> Option<String> {
        let extractor = extractor();
        let found = extractor.extract(name)?;
        let date = extractor.validate(&found).ok()?;
        Some(canonical_name(&date, &found.remainder))
    }

    #[test]
    fn test_day_first_dot_notation() {
        assert_eq!(
            normalized("Protokoll - 15.03.2025.docx").as_deref(),
            Some("2025-03-15 Protokoll.docx")
        );
    }

    #[test]
    fn test_day_period_month_name_year() {
        assert_eq!(
            normalized("Notizen 10. September 2023.docx").as_deref(),
            Some("2023-09-10 Notizen.docx")
        );
    }

    #[test]
    fn test_iso_with_underscore_before() {
        assert_eq!(
            normalized("Protokoll_2023-07-10.docx").as_deref(),
            Some("2023-07-10 Protokoll.docx")
        );
    }

    #[test]
    fn test_month_year_defaults_to_first() {
        let found = extractor().extract("April 2021 Bericht.docx").unwrap();
        assert_eq!(found.inferred, Some(Inferred::Day));
        assert_eq!(
            normalized("April 2021 Bericht.docx").as_deref(),
            Some("2021-04-01 Bericht.docx")
        );
    }

    #[test]
    fn test_iso_range_keeps_first_date() {
        let found = extractor().extract("2022-06-18-19 Notes.docx").unwrap();
        assert_eq!((found.year, found.month, found.day), (2022, 6, 18));
        assert_eq!(found.remainder, "19 Notes.docx");
        assert_eq!(
            normalized("2022-06-18-19 Notes.docx").as_deref(),
            Some("2022-06-18 19 Notes.docx")
        );
    }

    #[test]
    fn test_unrecognized_is_none() {
        assert_eq!(extractor().extract("Notes Sep.txt"), None);
        assert_eq!(extractor().extract(""), None);
        assert_eq!(extractor().extract("Readme.md"), None);
    }

    #[test]
    fn test_date_prefix_of_invalid_triple() {
        let found = extractor().extract("Notiz 31.04.2024.txt").unwrap();
        assert_eq!(found.date_prefix(), "2024-04-31");
        assert!(matches!(
            found.validate(2025),
            Err(ParseError::InvalidDay {
                year: 2024,
                month: 4,
                day: 31
            })
        ));
    }

    #[test]
    fn test_validate_rejects_future_year() {
        let found = extractor().extract("Plan 2030-01-01.txt").unwrap();
        assert!(matches!(
            found.validate(2025),
            Err(ParseError::InvalidYear { year: 2030, .. })
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::InvalidYear {
                year: 1850,
                latest: 2025
            }
            .to_string(),
            "Invalid year: 1850 (must be 1900-2025)"
        );
        assert_eq!(
            ParseError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 30
            }
            .to_string(),
            "Invalid day 30 for month 2023-02"
        );
    }

    #[test]
    fn test_free_functions_use_current_date() {
        assert!(is_valid_calendar_date(2000, 2, 29));
        assert!(!is_valid_calendar_date(2001, 2, 29));
        assert!(!is_valid_calendar_date(9999, 1, 1));
        let found = extract_date("Protokoll_2023-07-10.docx").unwrap();
        assert_eq!(found.pattern, "yyyy-mm-dd");
    }

    #[test]
    fn test_serialize_match() {
        let found = extractor().extract("April 2021 Bericht.docx").unwrap();
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["year"], 2021);
        assert_eq!(json["remainder"], "Bericht.docx");
        assert_eq!(json["inferred"], "day");
    }
}
