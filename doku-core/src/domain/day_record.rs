use serde::{Deserialize, Deserializer, Serialize};

/// Fallback break applied when a day has to be synthesized because no record
/// exists yet. Explicit records without a break use no break at all.
pub const DEFAULT_BREAK: ClockTime = ClockTime { h: 0, m: 45 };

/// A wall-clock time of day as stored on the wire: `{"h": 8, "m": 30}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub h: u32,
    pub m: u32,
}

impl ClockTime {
    pub fn new(h: u32, m: u32) -> Self {
        Self { h, m }
    }

    pub fn minutes_of_day(&self) -> i64 {
        self.h as i64 * 60 + self.m as i64
    }

    /// Parse `"HH:MM"`; anything without a separator or with unparsable
    /// parts is treated as unset.
    pub fn parse(clock: &str) -> Option<Self> {
        let (h, m) = clock.split_once(':')?;
        let parse = |part: &str| -> Option<u32> {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                return Some(0);
            }
            trimmed.parse().ok()
        };
        Some(Self::new(parse(h)?, parse(m)?))
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.h, self.m)
    }
}

/// Legacy stored pairs can be `null` or `{"h": null, "m": null}`; both count
/// as unset. A null `m` next to a set `h` counts as `:00`.
fn deserialize_clock<'de, D>(deserializer: D) -> Result<Option<ClockTime>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Raw {
        #[serde(default)]
        h: Option<f64>,
        #[serde(default)]
        m: Option<f64>,
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| {
        raw.h.map(|h| ClockTime {
            h: h.max(0.0) as u32,
            m: raw.m.unwrap_or(0.0).max(0.0) as u32,
        })
    }))
}

/// Documentation state of a day. Wire values are the original German ones;
/// unknown values degrade to `Undocumented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DayStatus {
    #[serde(rename = "dokumentiert")]
    Documented,
    #[serde(rename = "urlaub")]
    Vacation,
    #[serde(rename = "krank")]
    Sick,
    #[serde(rename = "abwesend")]
    Absent,
    #[default]
    #[serde(rename = "nicht dokumentiert")]
    #[serde(other)]
    Undocumented,
}

/// One tagged time slice within a day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    pub tag_names: Vec<String>,
    pub time: f64,
    pub note: String,
}

/// Pre-migration entry shape: one tag per slice.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LegacyTag {
    pub name: String,
    pub time: f64,
    pub note: String,
}

impl Default for LegacyTag {
    fn default() -> Self {
        Self {
            name: String::new(),
            time: 0.0,
            note: String::new(),
        }
    }
}

/// The per-date aggregate of status, working times and entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    #[serde(default)]
    pub status: DayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_hours: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_clock")]
    pub start_time: Option<ClockTime>,
    #[serde(default, deserialize_with = "deserialize_clock")]
    pub end_time: Option<ClockTime>,
    #[serde(default, deserialize_with = "deserialize_clock")]
    pub break_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Entry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<LegacyTag>>,
}

impl DayRecord {
    /// Stand-in for a date without a stored record.
    pub fn synthesized() -> Self {
        Self {
            break_time: Some(DEFAULT_BREAK),
            entries: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[Entry] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Bring a stored record into canonical shape: migrate the legacy
    /// single-tag `tags` list into `entries` (an existing `entries` list
    /// wins), and clamp entry times to finite, non-negative values.
    /// Returns whether a migration took place.
    pub fn normalize(&mut self) -> bool {
        let migrated = match (&self.entries, self.tags.take()) {
            (None, Some(tags)) => {
                self.entries = Some(
                    tags.into_iter()
                        .map(|tag| Entry {
                            tag_names: vec![tag.name],
                            time: tag.time,
                            note: tag.note,
                        })
                        .collect(),
                );
                true
            }
            _ => false,
        };

        let entries = self.entries.get_or_insert_with(Vec::new);
        for entry in entries {
            if !entry.time.is_finite() || entry.time < 0.0 {
                entry.time = 0.0;
            }
        }

        migrated
    }
}
