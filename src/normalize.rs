//! Helpers shared by every recognizer: two-digit year expansion, remainder
//! cleanup and canonical name assembly.

use std::sync::LazyLock;

use regex::Regex;

use crate::CalendarDate;
use crate::consts::{PIVOT_CENTURY, PREFIX_SEPARATOR, PREVIOUS_CENTURY};

#[allow(clippy::expect_used)]
pub(crate) fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in pattern must compile")
}

static CANONICAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\d{4}-\d{2}-\d{2} "));
static EMPTY_BRACKETS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\(\s*\)|\[\s*\]"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s{2,}"));
static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| pattern(r"_{2,}"));
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| pattern(r"-{2,}"));
static SPACED_HYPHENS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+-(?:\s+-)+\s+"));
static BEFORE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| pattern(r"[\s_.-]+(\.[^.\s]+)$"));
static BEFORE_COMMA: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+,"));

/// Expands a two-digit year with a rolling pivot: `20yy` unless that lies
/// after `current_year`, in which case `19yy`.
pub const fn expand_two_digit_year(yy: u16, current_year: u16) -> u16 {
    let yy = yy % 100;
    if PIVOT_CENTURY + yy > current_year {
        PREVIOUS_CENTURY + yy
    } else {
        PIVOT_CENTURY + yy
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '_' || c == '-'
}

/// Tidies what is left of a name once the date has been cut out of it.
pub fn clean_remainder(raw: &str) -> String {
    let text = EMPTY_BRACKETS.replace_all(raw, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = UNDERSCORE_RUN.replace_all(&text, "_");
    let text = HYPHEN_RUN.replace_all(&text, "-");
    let text = SPACED_HYPHENS.replace_all(&text, " - ");
    let text = BEFORE_EXTENSION.replace(&text, "$1");
    let text = BEFORE_COMMA.replace_all(&text, ",");
    text.trim_matches(is_separator).to_owned()
}

/// Whether the name already starts with a `yyyy-mm-dd ` prefix.
pub fn has_canonical_prefix(name: &str) -> bool {
    CANONICAL_PREFIX.is_match(name)
}

/// Builds `yyyy-mm-dd <remainder>`.
///
/// An empty remainder yields the bare date, and a remainder that is only an
/// extension is appended directly (`2025-03-15.docx`).
pub fn canonical_name(date: &CalendarDate, remainder: &str) -> String {
    if remainder.is_empty() {
        date.to_string()
    } else if remainder.starts_with('.') {
        format!("{date}{remainder}")
    } else {
        format!("{date}{PREFIX_SEPARATOR}{remainder}")
    }
}
