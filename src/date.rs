use std::str::FromStr;

use crate::ParseError;
use crate::consts::{DATE_SEPARATOR, MAX_YEAR};
use crate::prelude::*;
use crate::types::{Day, Month, Year};

/// A calendar date that exists in the Gregorian calendar and lies within
/// `MIN_YEAR..=latest` for the reference year it was validated against.
///
/// Each component is range-checked on construction, so a day past the end of
/// its month is rejected instead of rolling into the next month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// Validates a `(year, month, day)` triple.
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth` or `InvalidDay`, checked in that order.
    pub fn new(year: u16, month: u8, day: u8, latest_year: u16) -> Result<Self, ParseError> {
        let year_typed = Year::new(year, latest_year)?;
        let month_typed = Month::new(month)?;
        let day_typed = Day::new(day, year, month_typed)?;
        Ok(Self {
            year: year_typed,
            month: month_typed,
            day: day_typed,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }
}

/// Parses strict `yyyy-mm-dd`. Only `MIN_YEAR..=MAX_YEAR` is enforced here;
/// callers with a reference date compare against it themselves.
impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected yyyy{DATE_SEPARATOR}mm{DATE_SEPARATOR}dd, got '{trimmed}'"
            )));
        };

        let widths_ok = year.len() == 4 && month.len() == 2 && day.len() == 2;
        let digits_ok = parts
            .iter()
            .all(|part| part.chars().all(|c| c.is_ascii_digit()));
        if !widths_ok || !digits_ok {
            return Err(ParseError::InvalidFormat(format!(
                "Expected yyyy{DATE_SEPARATOR}mm{DATE_SEPARATOR}dd, got '{trimmed}'"
            )));
        }

        let parse_err = |part: &str| ParseError::InvalidFormat(format!("Invalid number: {part}"));
        Self::new(
            year.parse().map_err(|_| parse_err(year))?,
            month.parse().map_err(|_| parse_err(month))?,
            day.parse().map_err(|_| parse_err(day))?,
            MAX_YEAR,
        )
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn test_display_is_zero_padded() {
        let date = CalendarDate::new(1999, 3, 7, 2025).unwrap();
        assert_eq!(date.to_string(), "1999-03-07");
        assert_eq!((date.year(), date.month(), date.day()), (1999, 3, 7));
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(matches!(
            CalendarDate::new(2023, 2, 30, 2025),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            CalendarDate::new(2023, 13, 1, 2025),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            CalendarDate::new(2023, 1, 0, 2025),
            Err(ParseError::InvalidDay { day: 0, .. })
        ));
        assert!(matches!(
            CalendarDate::new(2023, 4, 31, 2025),
            Err(ParseError::InvalidDay { day: 31, .. })
        ));
    }

    #[test]
    fn test_year_window() {
        assert!(CalendarDate::new(1900, 1, 1, 2025).is_ok());
        assert!(CalendarDate::new(1899, 12, 31, 2025).is_err());
        assert!(CalendarDate::new(2025, 12, 31, 2025).is_ok());
        assert!(CalendarDate::new(2026, 1, 1, 2025).is_err());
    }

    #[test]
    fn test_agrees_with_chrono_round_trip() {
        // every triple we accept must survive a round trip through chrono
        // unchanged, and every triple chrono builds exactly must be accepted
        for year in [1900_u16, 1999, 2000, 2023, 2024] {
            for month in 0..=13_u8 {
                for day in 0..=32_u8 {
                    let ours = CalendarDate::new(year, month, day, 2025).is_ok();
                    let theirs = NaiveDate::from_ymd_opt(
                        i32::from(year),
                        u32::from(month),
                        u32::from(day),
                    )
                    .is_some_and(|date| {
                        date.year() == i32::from(year)
                            && date.month() == u32::from(month)
                            && date.day() == u32::from(day)
                    });
                    assert_eq!(ours, theirs, "{year}-{month}-{day}");
                }
            }
        }
    }

    #[test]
    fn test_serializes_as_string() {
        let date = CalendarDate::new(2021, 4, 1, 2025).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), r#""2021-04-01""#);
    }

    #[test]
    fn test_from_str() {
        let date: CalendarDate = "2023-07-10".parse().unwrap();
        assert_eq!(date, CalendarDate::new(2023, 7, 10, 2025).unwrap());
        assert_eq!(" 1999-12-31 ".parse::<CalendarDate>().unwrap().to_string(), "1999-12-31");

        assert_eq!("".parse::<CalendarDate>(), Err(ParseError::EmptyInput));
        assert!(matches!(
            "2023-7-10".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "10.07.2023".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-+7-10".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-02-29".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay { day: 29, .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let earlier = CalendarDate::new(2021, 4, 30, 2025).unwrap();
        let later = CalendarDate::new(2021, 5, 1, 2025).unwrap();
        assert!(earlier < later);
    }
}
