/// Earliest year accepted in a file name (inclusive)
pub const MIN_YEAR: u16 = 1900;

/// Hard ceiling for a four-digit year; the run's reference year is the real cap
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used when a name only carries month and year
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Century a two-digit year is tried in first
pub(crate) const PIVOT_CENTURY: u16 = 2000;
/// Century a two-digit year falls back to when the first guess lies in the future
pub(crate) const PREVIOUS_CENTURY: u16 = 1900;

/// Separator inside the canonical `yyyy-mm-dd` prefix
pub const DATE_SEPARATOR: char = '-';
/// Separator between the canonical prefix and the rest of the name
pub const PREFIX_SEPARATOR: char = ' ';

/// German month names, long and short, lowercased, mapped to month numbers.
/// `maerz`/`mrz` cover names typed without an umlaut.
pub const GERMAN_MONTHS: [(&str, u8); 28] = [
    ("januar", 1),
    ("jan", 1),
    ("februar", 2),
    ("feb", 2),
    ("märz", 3),
    ("maerz", 3),
    ("mär", 3),
    ("mrz", 3),
    ("april", 4),
    ("apr", 4),
    ("mai", 5),
    ("juni", 6),
    ("jun", 6),
    ("juli", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("oktober", 10),
    ("okt", 10),
    ("november", 11),
    ("nov", 11),
    ("dezember", 12),
    ("dez", 12),
    ("jänner", 1),
    ("jän", 1),
];

/// Extensions of files that are never renamed (the tool's own helper scripts)
pub const SCRIPT_EXTENSIONS: [&str; 6] = ["py", "sh", "bash", "ps1", "bat", "cmd"];
