//! Calendar period resolution: ISO week numbers, period parsing and the
//! enumeration of every date inside a day/week/month/year selection.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// ISO-8601 week number of a date, computed by shifting the date to the
/// Thursday of its week and counting seven-day blocks from that year's start.
/// Returns `(iso_year, week)`; the ISO year can differ from the calendar year
/// around New Year.
pub fn iso_week(date: NaiveDate) -> (i32, u32) {
    let to_thursday = 3 - date.weekday().num_days_from_monday() as i64;
    let thursday = date + Duration::days(to_thursday);
    let week = (thursday.ordinal() + 6) / 7;
    (thursday.year(), week)
}

/// Grouping key for week buckets, e.g. `2024-W02`.
pub fn week_key(date: NaiveDate) -> String {
    let (year, week) = iso_week(date);
    format!("{}-W{:02}", year, week)
}

/// German month name as rendered in the year overview.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month as usize - 1).min(11)]
}

/// A picked reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day(NaiveDate),
    Week { iso_year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Period {
    /// Parse a picker value for the given view, e.g. `("week", "2024-W23")`,
    /// `("month", "2024-06")`, `("year", "2024")` or `("day", "2024-06-03")`.
    pub fn parse(view: &str, value: &str) -> Option<Self> {
        match view {
            "day" => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(Period::Day),
            "week" => {
                let (year, week) = value.split_once("-W")?;
                let iso_year = year.parse().ok()?;
                let week: u32 = week.parse().ok()?;
                (1..=53).contains(&week).then_some(Period::Week { iso_year, week })
            }
            "month" => {
                let (year, month) = value.split_once('-')?;
                let year = year.parse().ok()?;
                let month: u32 = month.parse().ok()?;
                (1..=12).contains(&month).then_some(Period::Month { year, month })
            }
            "year" => value.parse().ok().map(Period::Year),
            _ => None,
        }
    }

    /// Every calendar date covered by the period, in order. A week is the
    /// Monday-start seven-day span of the picked ISO week.
    pub fn dates(&self) -> Vec<NaiveDate> {
        match *self {
            Period::Day(date) => vec![date],
            Period::Week { iso_year, week } => {
                let Some(monday) = NaiveDate::from_isoywd_opt(iso_year, week, Weekday::Mon) else {
                    return Vec::new();
                };
                (0..7).map(|i| monday + Duration::days(i)).collect()
            }
            Period::Month { year, month } => month_dates(year, month),
            Period::Year(year) => (1..=12).flat_map(|m| month_dates(year, m)).collect(),
        }
    }
}

fn month_dates(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect()
}
