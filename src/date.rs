// 📅 Anniversary Dates - tagged year-less / year-bearing dates
// Projects a recurring date onto its next occurrence relative to a reference day.
//
// Birthdays are stored as MM/DD (no year, may be undisclosed).
// Debuts are stored as YYYY/MM/DD (always present).
// The distinction lives in the types, never in string sniffing.

use crate::error::{AnniversaryError, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// chrono format for full dates (`2020/03/15`)
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Anniversary ages count 365-day years
const DAYS_IN_A_YEAR: i64 = 365;

/// Any leap year works; month/day pairs are validated against it so 02/29 is accepted
const LEAP_YEAR: i32 = 2000;

// ============================================================================
// ANNIVERSARY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnniversaryKind {
    /// Month/day only, may be undisclosed
    Birthday,

    /// Full date of the first stream
    Debut,
}

/// Per-kind handling rules
#[derive(Debug)]
pub struct KindRules {
    /// Shape of the stored string (letters stand for digits)
    pub shape: &'static str,

    /// Whether the stored date carries a year (and so an age)
    pub carries_year: bool,

    /// Whether the value may be missing from a streamer record
    pub may_be_undisclosed: bool,
}

static BIRTHDAY_RULES: KindRules = KindRules {
    shape: "MM/DD",
    carries_year: false,
    may_be_undisclosed: true,
};

static DEBUT_RULES: KindRules = KindRules {
    shape: "YYYY/MM/DD",
    carries_year: true,
    may_be_undisclosed: false,
};

impl AnniversaryKind {
    pub const ALL: [AnniversaryKind; 2] = [AnniversaryKind::Birthday, AnniversaryKind::Debut];

    pub fn rules(self) -> &'static KindRules {
        match self {
            AnniversaryKind::Birthday => &BIRTHDAY_RULES,
            AnniversaryKind::Debut => &DEBUT_RULES,
        }
    }

    /// Machine tag, as used in data files and query strings
    pub fn as_str(self) -> &'static str {
        match self {
            AnniversaryKind::Birthday => "birthday",
            AnniversaryKind::Debut => "debut",
        }
    }

    /// Human-readable name for display
    pub fn label(self) -> &'static str {
        match self {
            AnniversaryKind::Birthday => "Birthday",
            AnniversaryKind::Debut => "Debut",
        }
    }

    /// Parse a stored date string into its tagged representation
    pub fn parse_date(self, value: &str) -> Result<AnniversaryDate> {
        match self {
            AnniversaryKind::Birthday => MonthDay::parse(value).map(AnniversaryDate::YearLess),
            AnniversaryKind::Debut => parse_full_date(value).map(AnniversaryDate::Full),
        }
    }

    fn invalid(self, value: &str) -> AnniversaryError {
        AnniversaryError::InvalidDateFormat {
            kind: self,
            value: value.to_string(),
            expected: self.rules().shape,
        }
    }
}

impl fmt::Display for AnniversaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnniversaryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AnniversaryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown anniversary kind: {}", s))
    }
}

/// Checks `value` against a shape such as `YYYY/MM/DD`: slashes must match, everything else is a digit
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'/' => v == b'/',
            _ => v.is_ascii_digit(),
        })
}

/// Parse a `YYYY/MM/DD` debut date
pub fn parse_full_date(value: &str) -> Result<NaiveDate> {
    let kind = AnniversaryKind::Debut;
    if !has_shape(value, kind.rules().shape) {
        return Err(kind.invalid(value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| kind.invalid(value))
}

// ============================================================================
// MONTH / DAY
// ============================================================================

/// A year-less calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(LEAP_YEAR, month, day).map(|_| MonthDay { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Parse an `MM/DD` string
    pub fn parse(value: &str) -> Result<Self> {
        let kind = AnniversaryKind::Birthday;
        if !has_shape(value, kind.rules().shape) {
            return Err(kind.invalid(value));
        }

        // A bare month/day is never handed to the parser; a year is injected first
        let injected = format!("{}/{}", LEAP_YEAR, value);
        let date = NaiveDate::parse_from_str(&injected, DATE_FORMAT).map_err(|_| kind.invalid(value))?;

        Ok(MonthDay {
            month: date.month(),
            day: date.day(),
        })
    }

    /// This month/day in `year`; Feb 29 falls on Mar 1 outside leap years
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).or_else(|| {
            if self.month == 2 && self.day == 29 {
                NaiveDate::from_ymd_opt(year, 3, 1)
            } else {
                None
            }
        })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = AnniversaryError;

    fn from_str(s: &str) -> Result<Self> {
        MonthDay::parse(s)
    }
}

impl TryFrom<String> for MonthDay {
    type Error = AnniversaryError;

    fn try_from(value: String) -> Result<Self> {
        MonthDay::parse(&value)
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}

/// serde adapter for `YYYY/MM/DD` fields
pub mod ymd_format {
    use super::{parse_full_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_full_date(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// ANNIVERSARY DATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnniversaryDate {
    /// No year component (birthdays)
    YearLess(MonthDay),

    /// Year-bearing origin date (debuts)
    Full(NaiveDate),
}

impl AnniversaryDate {
    pub fn kind(&self) -> AnniversaryKind {
        match self {
            AnniversaryDate::YearLess(_) => AnniversaryKind::Birthday,
            AnniversaryDate::Full(_) => AnniversaryKind::Debut,
        }
    }

    fn month_day(&self) -> MonthDay {
        match self {
            AnniversaryDate::YearLess(md) => *md,
            AnniversaryDate::Full(date) => MonthDay {
                month: date.month(),
                day: date.day(),
            },
        }
    }

    /// The occurrence of this anniversary in `year`
    pub fn in_year(&self, year: i32) -> Result<NaiveDate> {
        self.month_day()
            .in_year(year)
            .ok_or(AnniversaryError::DateOutOfRange {
                kind: self.kind(),
                year,
            })
    }

    /// Soonest occurrence on or after `reference`.
    ///
    /// Same-day occurrences are returned as-is; anything already past this
    /// year moves to the following year.
    pub fn next_occurrence(&self, reference: NaiveDate) -> Result<NaiveDate> {
        let year = reference.year();
        let this_year = self.in_year(year)?;

        if this_year < reference {
            self.in_year(year + 1)
        } else {
            Ok(this_year)
        }
    }

    /// Number of anniversaries counted up to `reference` (ceiling of elapsed years).
    /// Year-less dates have no age.
    pub fn age_at(&self, reference: NaiveDate) -> Option<i64> {
        match self {
            AnniversaryDate::YearLess(_) => None,
            AnniversaryDate::Full(origin) => {
                let elapsed = (reference - *origin).num_days();
                Some(ceil_div(elapsed, DAYS_IN_A_YEAR))
            }
        }
    }
}

impl fmt::Display for AnniversaryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnniversaryDate::YearLess(md) => fmt::Display::fmt(md, f),
            AnniversaryDate::Full(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}

// ============================================================================
// STRING ENTRY POINTS
// ============================================================================

/// Next occurrence on or after `reference` of a stored date string
pub fn normalize_date(value: &str, kind: AnniversaryKind, reference: NaiveDate) -> Result<NaiveDate> {
    kind.parse_date(value)?.next_occurrence(reference)
}

/// Anniversary count for a stored date string; always `None` for kinds without a year
pub fn compute_age(value: &str, kind: AnniversaryKind, reference: NaiveDate) -> Result<Option<i64>> {
    if !kind.rules().carries_year {
        return Ok(None);
    }
    Ok(kind.parse_date(value)?.age_at(reference))
}

/// Whole days from `reference` to `occurrence`
pub fn days_until(occurrence: NaiveDate, reference: NaiveDate) -> i64 {
    (occurrence - reference).num_days()
}

/// Strip the time-of-day from a timestamp
pub fn truncate_to_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.date_naive()
}

/// Today's local calendar date. Capture once per classification.
pub fn today() -> NaiveDate {
    truncate_to_date(&Local::now())
}

// ============================================================================
// TESTS
// ============================================================================
