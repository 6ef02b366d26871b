//! The ordered recognizer chain.
//!
//! Each recognizer handles one naming convention and scans the name left to
//! right, accepting the first occurrence that is a whole token: a candidate
//! whose first or last character continues a run of digits (or letters) in
//! the surrounding text is skipped. Recognizers always see the original name.
//! The chain stops at the first recognizer that fires; fixed-width numeric
//! forms come first because the looser forms would truncate their fields.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::{Captures, Regex};

use crate::consts::MIN_DAY;
use crate::normalize::{clean_remainder, expand_two_digit_year, pattern};
use crate::types::Month;
use crate::{CalendarDate, DateMatch, Inferred, ParseError};

/// What a recognizer found, before the remainder is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Found {
    year: u16,
    month: u8,
    day: u8,
    /// Byte ranges of the name that make up the date
    cut: Vec<Range<usize>>,
    inferred: Option<Inferred>,
}

impl Found {
    fn new(year: u16, month: u8, day: u8, span: Range<usize>) -> Self {
        Self {
            year,
            month,
            day,
            cut: vec![span],
            inferred: None,
        }
    }

    fn inferring(mut self, inferred: Inferred) -> Self {
        self.inferred = Some(inferred);
        self
    }

    fn also_cut(mut self, span: Range<usize>) -> Self {
        self.cut.push(span);
        self
    }
}

/// One naming convention in the chain.
#[derive(Clone, Copy)]
pub struct Recognizer {
    label: &'static str,
    recognize: fn(&str, u16) -> Option<Found>,
}

impl Recognizer {
    /// Short human-readable name of the convention, e.g. `d.m.yy`.
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Recognizer").field(&self.label).finish()
    }
}

/// All recognizers in priority order.
pub const CHAIN: [Recognizer; 10] = [
    Recognizer {
        label: "yyyy-mm-dd-dd",
        recognize: iso_range,
    },
    Recognizer {
        label: "yyyy-mm-dd",
        recognize: iso,
    },
    Recognizer {
        label: "dd-mm-yyyy",
        recognize: day_first_fixed,
    },
    Recognizer {
        label: "d.m.yy",
        recognize: day_first_dotted,
    },
    Recognizer {
        label: "yyyy-m-d",
        recognize: loose_year_first,
    },
    Recognizer {
        label: "d-m-yyyy",
        recognize: loose_day_first,
    },
    Recognizer {
        label: "d monthname yy",
        recognize: day_month_name_year,
    },
    Recognizer {
        label: "d. monthname yyyy",
        recognize: day_dot_month_name_year,
    },
    Recognizer {
        label: "monthname yyyy",
        recognize: month_name_year,
    },
    Recognizer {
        label: "d.m.",
        recognize: partial_day_month,
    },
];

/// Runs the chain against names relative to a fixed reference date.
///
/// The reference date decides the two-digit year pivot, the latest year a
/// name may carry and the year used for partial `d.m.` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    today: NaiveDate,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::now()
    }
}

impl Extractor {
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// An extractor anchored at the local calendar date.
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub const fn reference_date(&self) -> NaiveDate {
        self.today
    }

    pub fn current_year(&self) -> u16 {
        u16::try_from(self.today.year()).unwrap_or(0)
    }

    /// Returns the first match in chain order, or `None` when no recognizer
    /// fires.
    pub fn extract(&self, name: &str) -> Option<DateMatch> {
        let current_year = self.current_year();
        CHAIN.iter().find_map(|recognizer| {
            (recognizer.recognize)(name, current_year).map(|found| DateMatch {
                year: found.year,
                month: found.month,
                day: found.day,
                remainder: cut_out(name, &found.cut),
                pattern: recognizer.label,
                inferred: found.inferred,
            })
        })
    }

    /// Validates a match against the calendar and the reference year.
    ///
    /// # Errors
    /// Returns the offending component when the triple is not a real date
    /// between `MIN_YEAR` and the reference year.
    pub fn validate(&self, found: &DateMatch) -> Result<CalendarDate, ParseError> {
        found.validate(self.current_year())
    }

    pub fn is_valid_calendar_date(&self, year: u16, month: u8, day: u8) -> bool {
        CalendarDate::new(year, month, day, self.current_year()).is_ok()
    }
}

/// Removes the date spans from `name` and cleans what is left.
fn cut_out(name: &str, cut: &[Range<usize>]) -> String {
    let mut spans = cut.to_vec();
    spans.sort_by_key(|span| span.start);
    let mut rest = String::with_capacity(name.len());
    let mut position = 0;
    for span in spans {
        rest.push_str(&name[position..span.start.max(position)]);
        position = position.max(span.end);
    }
    rest.push_str(&name[position..]);
    clean_remainder(&rest)
}

fn same_kind(a: Option<char>, b: Option<char>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            (a.is_ascii_digit() && b.is_ascii_digit()) || (a.is_alphabetic() && b.is_alphabetic())
        }
        _ => false,
    }
}

/// Whether `span` is a whole token: it neither extends a digit run nor a
/// letter run of the surrounding text.
fn is_token(name: &str, span: &Range<usize>) -> bool {
    let text = &name[span.clone()];
    let before = name[..span.start].chars().next_back();
    let after = name[span.end..].chars().next();
    !same_kind(before, text.chars().next()) && !same_kind(text.chars().next_back(), after)
}

/// Scans `name` left to right for the first token matched by `re` that
/// `accept` turns into a value.
fn scan<T>(re: &Regex, name: &str, mut accept: impl FnMut(&Captures<'_>) -> Option<T>) -> Option<T> {
    let mut at = 0;
    while at < name.len() {
        let caps = re.captures_at(name, at)?;
        let whole = caps.get(0)?;
        if is_token(name, &whole.range()) {
            if let Some(value) = accept(&caps) {
                return Some(value);
            }
        }
        at = whole.start() + name[whole.start()..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

fn number<T: FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}

/// A year group holding either four digits or two digits to be pivoted.
fn year_group(caps: &Captures<'_>, group: usize, current_year: u16) -> Option<u16> {
    let digits = caps.get(group)?.as_str();
    let value = digits.parse().ok()?;
    if digits.len() == 2 {
        Some(expand_two_digit_year(value, current_year))
    } else {
        Some(value)
    }
}

/// Text that can only be a file extension without its dot: `docx`, `pdf`.
fn is_bare_extension(rest: &str) -> bool {
    !rest.is_empty() && !rest.contains(|c: char| c == '.' || c.is_whitespace())
}

fn whole(caps: &Captures<'_>) -> Option<Range<usize>> {
    caps.get(0).map(|m| m.range())
}

static ISO_RANGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(\d{4})-(\d{2})-(\d{2})-(\d{2})"));
static ISO: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\d{4})[-_.](\d{2})[-_.](\d{2})"));
static DAY_FIRST_FIXED: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(\d{2})[-_.](\d{2})[-_.](\d{4})"));
static DAY_FIRST_DOTTED: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(\d{1,2})\.(\d{1,2})\.(\d{4}|\d{2})"));
static LOOSE_YEAR_FIRST: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(\d{4})[-_.](\d{1,2})[-_.](\d{1,2})"));
static LOOSE_DAY_FIRST: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(\d{1,2})[-_](\d{1,2})[-_](\d{4})"));
static DAY_MONTH_NAME_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(\d{1,2})\.?[ -]+([\p{L}\p{M}]+)\.?[ -]+(\d{4}|\d{2})(?:[ -]+(\d+))?")
});
static DAY_DOT_MONTH_NAME_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(\d{1,2})\.[\s_.-]*([\p{L}\p{M}]+)\.?[\s_.,-]*(\d{4}|\d{2})")
});
static MONTH_NAME_YEAR: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"([\p{L}\p{M}]+)\.?[ _.-]*(\d{4})"));
static DAY_MONTH_PAIR: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\d{1,2})\.(\d{1,2})\."));
static BARE_YEAR: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?:19|20)\d{2}"));

/// `2022-06-18-19`: a span of days within one month. Only the start date is
/// taken; the end day stays in the remainder.
fn iso_range(name: &str, _current_year: u16) -> Option<Found> {
    scan(&ISO_RANGE, name, |caps| {
        let day: u8 = number(caps, 3)?;
        let end_day: u8 = number(caps, 4)?;
        if end_day <= day {
            return None;
        }
        let start = caps.get(0)?.start();
        let end = caps.get(3)?.end();
        Some(Found::new(number(caps, 1)?, number(caps, 2)?, day, start..end))
    })
}

fn iso(name: &str, _current_year: u16) -> Option<Found> {
    scan(&ISO, name, |caps| {
        Some(Found::new(
            number(caps, 1)?,
            number(caps, 2)?,
            number(caps, 3)?,
            whole(caps)?,
        ))
    })
}

fn day_first_fixed(name: &str, _current_year: u16) -> Option<Found> {
    scan(&DAY_FIRST_FIXED, name, |caps| {
        Some(Found::new(
            number(caps, 3)?,
            number(caps, 2)?,
            number(caps, 1)?,
            whole(caps)?,
        ))
    })
}

fn day_first_dotted(name: &str, current_year: u16) -> Option<Found> {
    scan(&DAY_FIRST_DOTTED, name, |caps| {
        Some(Found::new(
            year_group(caps, 3, current_year)?,
            number(caps, 2)?,
            number(caps, 1)?,
            whole(caps)?,
        ))
    })
}

fn loose_year_first(name: &str, _current_year: u16) -> Option<Found> {
    scan(&LOOSE_YEAR_FIRST, name, |caps| {
        Some(Found::new(
            number(caps, 1)?,
            number(caps, 2)?,
            number(caps, 3)?,
            whole(caps)?,
        ))
    })
}

fn loose_day_first(name: &str, _current_year: u16) -> Option<Found> {
    scan(&LOOSE_DAY_FIRST, name, |caps| {
        Some(Found::new(
            number(caps, 3)?,
            number(caps, 2)?,
            number(caps, 1)?,
            whole(caps)?,
        ))
    })
}

/// `5 Mai 2021`, `10. Sept. 23`, `12-Jan-23-2023`. A four-digit year after a
/// two-digit one is swallowed only when both name the same year. The trailing
/// group takes the whole digit run so that a longer number after the date
/// does not break the token boundary.
fn day_month_name_year(name: &str, current_year: u16) -> Option<Found> {
    scan(&DAY_MONTH_NAME_YEAR, name, |caps| {
        let month = Month::from_name(caps.get(2)?.as_str())?;
        let year_match = caps.get(3)?;
        let year = year_group(caps, 3, current_year)?;
        let end = match caps.get(4) {
            Some(repeat)
                if year_match.len() == 2
                    && repeat.len() == 4
                    && repeat.as_str().parse::<u16>().ok() == Some(year) =>
            {
                repeat.end()
            }
            _ => year_match.end(),
        };
        let start = caps.get(0)?.start();
        Some(Found::new(year, month.get(), number(caps, 1)?, start..end))
    })
}

/// `10.September2023`, `3._Mai_2021`: a period after the day and any
/// separators, or none, around the month name.
fn day_dot_month_name_year(name: &str, current_year: u16) -> Option<Found> {
    scan(&DAY_DOT_MONTH_NAME_YEAR, name, |caps| {
        let month = Month::from_name(caps.get(2)?.as_str())?;
        Some(Found::new(
            year_group(caps, 3, current_year)?,
            month.get(),
            number(caps, 1)?,
            whole(caps)?,
        ))
    })
}

fn month_name_year(name: &str, _current_year: u16) -> Option<Found> {
    scan(&MONTH_NAME_YEAR, name, |caps| {
        let month = Month::from_name(caps.get(1)?.as_str())?;
        let found = Found::new(number(caps, 2)?, month.get(), MIN_DAY, whole(caps)?);
        Some(found.inferring(Inferred::Day))
    })
}

/// `3.5.` with the year, if any, somewhere else in the name. A pair that is
/// part of a longer dotted number (`1.2.3`) is not a date. When the closing
/// dot is also the extension dot (`24.12.docx`) it stays in the name.
fn partial_day_month(name: &str, current_year: u16) -> Option<Found> {
    scan(&DAY_MONTH_PAIR, name, |caps| {
        let mut pair = whole(caps)?;
        if name[..pair.start].ends_with('.')
            || name[pair.end..].starts_with(|c: char| c.is_ascii_digit())
        {
            return None;
        }
        if is_bare_extension(&name[pair.end..]) {
            pair.end -= 1;
        }
        let found = Found::new(current_year, number(caps, 2)?, number(caps, 1)?, pair.clone());
        let year = scan(&BARE_YEAR, name, |year_caps| {
            let span = whole(year_caps)?;
            let disjoint = span.end <= pair.start || span.start >= pair.end;
            disjoint.then_some(span)
        });
        Some(match year {
            Some(span) => Found {
                year: name[span.clone()].parse().ok()?,
                ..found
            }
            .also_cut(span),
            None => found.inferring(Inferred::Year),
        })
    })
}
