//! Target-vs-actual hour aggregation over days and calendar periods.

use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use serde::Serialize;

use crate::domain::{DayRecord, DayStatus};
use crate::period::{iso_week, month_name, Period};
use crate::Document;

/// Target hours per weekday, Monday through Sunday.
pub const DAILY_WORK_HOURS: [f64; 7] = [8.25, 8.25, 8.25, 8.25, 7.0, 0.0, 0.0];

pub fn weekday_target(weekday: Weekday) -> f64 {
    DAILY_WORK_HOURS[weekday.num_days_from_monday() as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayTotals {
    pub target: f64,
    pub actual: f64,
    pub diff: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub status: DayStatus,
    #[serde(flatten)]
    pub totals: DayTotals,
}

/// One bucket of a period summary: a calendar week inside a month, or a
/// month inside a year.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub label: String,
    pub target: f64,
    pub actual: f64,
    pub diff: f64,
    pub days: Vec<DaySummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub target: f64,
    pub actual: f64,
    pub diff: f64,
    pub groups: Vec<GroupSummary>,
}

/// Worked hours of a single record: the start/end/break span when it is
/// usable (both ends set, end after start), otherwise the sum of its entry
/// times.
pub fn actual_hours(record: &DayRecord) -> f64 {
    if let (Some(start), Some(end)) = (record.start_time, record.end_time) {
        let worked = end.minutes_of_day() - start.minutes_of_day();
        if worked > 0 {
            let break_minutes = record.break_time.map_or(0, |b| b.minutes_of_day());
            return (worked - break_minutes) as f64 / 60.0;
        }
    }

    record.entries().iter().map(|entry| entry.time).sum()
}

/// Target and actual hours for one date. The weekday table supplies the
/// target unless the stored record overrides it; a date without a record
/// contributes no actual hours.
pub fn day_totals(document: &Document, date: NaiveDate) -> DayTotals {
    let record = document.app_data.get(&date);
    let target = record
        .and_then(|r| r.work_hours)
        .unwrap_or_else(|| weekday_target(date.weekday()));
    let actual = record.map_or(0.0, actual_hours);

    DayTotals {
        target,
        actual,
        diff: actual - target,
    }
}

/// Summed day totals over a set of dates.
pub fn group_totals(document: &Document, dates: &[NaiveDate]) -> DayTotals {
    let (target, actual) = dates.iter().fold((0.0, 0.0), |(target, actual), &date| {
        let day = day_totals(document, date);
        (target + day.target, actual + day.actual)
    });

    DayTotals {
        target,
        actual,
        diff: actual - target,
    }
}

/// Nested summary of a period: overall totals plus ordered groups — weeks
/// inside a month, months inside a year, the days themselves for a week.
pub fn period_summary(document: &Document, period: Period) -> PeriodSummary {
    let dates = period.dates();

    // Years bucket by month, everything else by calendar week.
    let groups: Vec<GroupSummary> = match period {
        Period::Year(_) => grouped(document, &dates, |date| {
            (date.month(), month_name(date.month()).to_string())
        }),
        _ => grouped(document, &dates, |date| {
            let (year, week) = iso_week(date);
            ((year, week), format!("KW {}", week))
        }),
    };

    let totals = group_totals(document, &dates);
    PeriodSummary {
        target: totals.target,
        actual: totals.actual,
        diff: totals.diff,
        groups,
    }
}

fn grouped<K: PartialEq>(
    document: &Document,
    dates: &[NaiveDate],
    key: impl Fn(NaiveDate) -> (K, String),
) -> Vec<GroupSummary> {
    dates
        .iter()
        .chunk_by(|&&date| key(date))
        .into_iter()
        .map(|((_, label), chunk)| {
            let days: Vec<DaySummary> = chunk
                .map(|&date| DaySummary {
                    date,
                    status: document.record(date).status,
                    totals: day_totals(document, date),
                })
                .collect();
            let (target, actual) = days
                .iter()
                .fold((0.0, 0.0), |(t, a), day| {
                    (t + day.totals.target, a + day.totals.actual)
                });
            GroupSummary {
                label,
                target,
                actual,
                diff: actual - target,
                days,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Entry};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(time: f64) -> Entry {
        Entry {
            tag_names: vec!["Messen".to_string()],
            time,
            note: String::new(),
        }
    }

    #[test]
    fn weekday_table_matches_the_contract() {
        // 2024-06-03 is a Monday.
        let monday = date(2024, 6, 3);
        assert_eq!(day_totals(&Document::default(), monday).target, 8.25);
        assert_eq!(weekday_target(Weekday::Fri), 7.0);
        assert_eq!(weekday_target(Weekday::Sat), 0.0);
        assert_eq!(weekday_target(Weekday::Sun), 0.0);
    }

    #[test]
    fn start_end_break_span_wins_over_entries() {
        let mut document = Document::default();
        document.app_data.insert(
            date(2024, 6, 3),
            DayRecord {
                start_time: Some(ClockTime::new(8, 0)),
                end_time: Some(ClockTime::new(16, 45)),
                break_time: Some(ClockTime::new(0, 45)),
                entries: Some(vec![entry(1.0)]),
                ..DayRecord::default()
            },
        );
        let totals = day_totals(&document, date(2024, 6, 3));
        assert_eq!(totals.actual, 8.0);
        assert!((totals.diff - (8.0 - 8.25)).abs() < 1e-9);
    }

    #[test]
    fn entries_sum_when_no_usable_span_exists() {
        let mut document = Document::default();
        document.app_data.insert(
            date(2024, 6, 3),
            DayRecord {
                entries: Some(vec![entry(1.5), entry(2.0)]),
                ..DayRecord::default()
            },
        );
        assert_eq!(day_totals(&document, date(2024, 6, 3)).actual, 3.5);
    }

    #[test]
    fn inverted_span_falls_back_to_entries() {
        let mut document = Document::default();
        document.app_data.insert(
            date(2024, 6, 3),
            DayRecord {
                start_time: Some(ClockTime::new(16, 0)),
                end_time: Some(ClockTime::new(8, 0)),
                entries: Some(vec![entry(2.5)]),
                ..DayRecord::default()
            },
        );
        assert_eq!(day_totals(&document, date(2024, 6, 3)).actual, 2.5);
    }

    #[test]
    fn missing_break_counts_as_zero() {
        let mut document = Document::default();
        document.app_data.insert(
            date(2024, 6, 3),
            DayRecord {
                start_time: Some(ClockTime::new(8, 0)),
                end_time: Some(ClockTime::new(16, 0)),
                ..DayRecord::default()
            },
        );
        assert_eq!(day_totals(&document, date(2024, 6, 3)).actual, 8.0);
    }

    #[test]
    fn work_hours_override_beats_the_weekday_table() {
        let mut document = Document::default();
        document.app_data.insert(
            date(2024, 6, 3),
            DayRecord {
                work_hours: Some(6.0),
                ..DayRecord::default()
            },
        );
        assert_eq!(day_totals(&document, date(2024, 6, 3)).target, 6.0);
    }

    #[test]
    fn group_totals_sum_over_dates() {
        let mut document = Document::default();
        document.app_data.insert(
            date(2024, 6, 3),
            DayRecord {
                entries: Some(vec![entry(8.0)]),
                ..DayRecord::default()
            },
        );
        document.app_data.insert(
            date(2024, 6, 4),
            DayRecord {
                entries: Some(vec![entry(4.0)]),
                ..DayRecord::default()
            },
        );
        // Mon + Tue of the first full June week.
        let dates = [date(2024, 6, 3), date(2024, 6, 4)];
        let totals = group_totals(&document, &dates);
        assert_eq!(totals.target, 16.5);
        assert_eq!(totals.actual, 12.0);
        assert_eq!(totals.diff, -4.5);
    }

    #[test]
    fn month_summary_groups_by_week() {
        let document = Document::default();
        let summary = period_summary(
            &document,
            Period::Month {
                year: 2024,
                month: 6,
            },
        );
        // June 2024 spans calendar weeks 22 through 26.
        assert_eq!(summary.groups.len(), 5);
        assert_eq!(summary.groups[0].label, "KW 22");
        assert_eq!(summary.groups[4].label, "KW 26");
        let days: usize = summary.groups.iter().map(|g| g.days.len()).sum();
        assert_eq!(days, 30);
        // 4 full weeks (40.25 h each) plus Sat/Sun of KW 22 and Mon..Fri of KW 26.
        assert_eq!(summary.target, 160.0);
    }

    #[test]
    fn year_summary_groups_by_month_name() {
        let document = Document::default();
        let summary = period_summary(&document, Period::Year(2024));
        assert_eq!(summary.groups.len(), 12);
        assert_eq!(summary.groups[0].label, "Januar");
        assert_eq!(summary.groups[11].label, "Dezember");
    }

    #[test]
    fn week_summary_carries_day_statuses() {
        let mut document = Document::default();
        document.app_data.insert(
            date(2024, 6, 3),
            DayRecord {
                status: DayStatus::Vacation,
                ..DayRecord::default()
            },
        );
        let summary = period_summary(
            &document,
            Period::Week {
                iso_year: 2024,
                week: 23,
            },
        );
        assert_eq!(summary.groups.len(), 1);
        let days = &summary.groups[0].days;
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].status, DayStatus::Vacation);
        assert_eq!(days[1].status, DayStatus::Undocumented);
    }
}
