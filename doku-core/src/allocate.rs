//! Chart dataset allocation: an entry's time is split evenly across its
//! tags, then rolled up per tag and per category.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Category, DayRecord, Entry};
use crate::Document;

/// The share of an entry's time that each of its tags receives. An entry
/// without tags contributes nothing.
pub fn entry_share(entry: &Entry) -> f64 {
    if entry.tag_names.is_empty() {
        0.0
    } else {
        entry.time / entry.tag_names.len() as f64
    }
}

/// Total allocated hours per tag over a set of records (pie dataset).
pub fn tag_totals<'a>(records: impl IntoIterator<Item = &'a DayRecord>) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for record in records {
        for entry in record.entries() {
            let share = entry_share(entry);
            for tag in &entry.tag_names {
                *totals.entry(tag.clone()).or_insert(0.0) += share;
            }
        }
    }
    totals
}

/// Total allocated hours per radar category over a set of records. Tags that
/// are missing from the map, or map to a non-radar category, are skipped.
pub fn category_totals<'a>(
    records: impl IntoIterator<Item = &'a DayRecord>,
    tag_category_map: &BTreeMap<String, Category>,
) -> BTreeMap<Category, f64> {
    let mut totals: BTreeMap<Category, f64> =
        Category::RADAR.iter().map(|&c| (c, 0.0)).collect();

    for record in records {
        for entry in record.entries() {
            let share = entry_share(entry);
            for tag in &entry.tag_names {
                let Some(category) = tag_category_map.get(tag) else {
                    continue;
                };
                if let Some(total) = totals.get_mut(category) {
                    *total += share;
                }
            }
        }
    }

    totals
}

/// One stacked-bar series: a tag's allocated hours for each date of the
/// period, in date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSeries {
    pub label: String,
    pub data: Vec<f64>,
}

/// Per-date per-tag allocation for the stacked weekly bar chart. Tags appear
/// in first-seen order across the period.
pub fn tag_matrix(document: &Document, dates: &[NaiveDate]) -> Vec<TagSeries> {
    let mut labels: Vec<String> = Vec::new();
    for &date in dates {
        for entry in document.record(date).entries() {
            for tag in &entry.tag_names {
                if !labels.contains(tag) {
                    labels.push(tag.clone());
                }
            }
        }
    }

    labels
        .into_iter()
        .map(|label| {
            let data = dates
                .iter()
                .map(|&date| {
                    document
                        .record(date)
                        .entries()
                        .iter()
                        .filter(|entry| entry.tag_names.contains(&label))
                        .map(entry_share)
                        .sum()
                })
                .collect();
            TagSeries { label, data }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tags: &[&str], time: f64) -> Entry {
        Entry {
            tag_names: tags.iter().map(|t| t.to_string()).collect(),
            time,
            note: String::new(),
        }
    }

    fn record(entries: Vec<Entry>) -> DayRecord {
        DayRecord {
            entries: Some(entries),
            ..DayRecord::default()
        }
    }

    #[test]
    fn time_splits_evenly_across_tags() {
        let record = record(vec![entry(&["Messen", "Planung"], 1.0)]);
        let totals = tag_totals([&record]);
        assert_eq!(totals["Messen"], 0.5);
        assert_eq!(totals["Planung"], 0.5);
    }

    #[test]
    fn untagged_entries_contribute_nothing() {
        let record = record(vec![entry(&[], 3.0), entry(&["Messen"], 1.0)]);
        let totals = tag_totals([&record]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Messen"], 1.0);
    }

    #[test]
    fn tag_totals_accumulate_across_records() {
        let monday = record(vec![entry(&["Messen"], 1.0)]);
        let tuesday = record(vec![entry(&["Messen"], 2.5)]);
        let totals = tag_totals([&monday, &tuesday]);
        assert_eq!(totals["Messen"], 3.5);
    }

    #[test]
    fn category_totals_cover_the_radar_set() {
        let mut map = BTreeMap::new();
        map.insert("Messen".to_string(), Category::Technik);
        map.insert("Kaffee".to_string(), Category::Sonstiges);

        let record = record(vec![
            entry(&["Messen", "Kaffee"], 2.0),
            entry(&["Unbekannt"], 4.0),
        ]);
        let totals = category_totals([&record], &map);

        assert_eq!(totals.len(), Category::RADAR.len());
        // Only the Technik share counts: Sonstiges is off the radar and the
        // unmapped tag is skipped.
        assert_eq!(totals[&Category::Technik], 1.0);
        assert_eq!(totals[&Category::Analyse], 0.0);
        assert!(!totals.contains_key(&Category::Sonstiges));
    }

    #[test]
    fn matrix_rows_follow_date_order() {
        use chrono::NaiveDate;

        let mut document = Document::default();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        document
            .app_data
            .insert(monday, record(vec![entry(&["Messen", "Planung"], 1.0)]));
        document
            .app_data
            .insert(tuesday, record(vec![entry(&["Messen"], 2.0)]));

        let series = tag_matrix(&document, &[monday, tuesday]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Messen");
        assert_eq!(series[0].data, vec![0.5, 2.0]);
        assert_eq!(series[1].label, "Planung");
        assert_eq!(series[1].data, vec![0.5, 0.0]);
    }
}
