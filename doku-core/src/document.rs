use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, DayRecord, Project, Todo, DEFAULT_TAGS};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TagError {
    #[error("unknown tag: {0}")]
    UnknownTag(String),
    #[error("tag already exists: {0}")]
    DuplicateTag(String),
}

/// One context's complete stored state: the day records, the tag library and
/// the to-do/project lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_name: Option<String>,
    #[serde(default)]
    pub app_data: BTreeMap<NaiveDate, DayRecord>,
    #[serde(default)]
    pub tag_category_map: BTreeMap<String, Category>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_styles: BTreeMap<Category, String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl Document {
    /// Canonicalize a freshly loaded document: every day record is
    /// normalized, which applies the one-time legacy `tags` migration.
    pub fn normalize(&mut self) {
        let migrated = self
            .app_data
            .values_mut()
            .map(|record| record.normalize())
            .filter(|&migrated| migrated)
            .count();
        if migrated > 0 {
            tracing::debug!(migrated, "migrated legacy tag lists to entries");
        }
    }

    /// The record for a date, synthesizing the status-derived default when
    /// none is stored.
    pub fn record(&self, date: NaiveDate) -> Cow<'_, DayRecord> {
        match self.app_data.get(&date) {
            Some(record) => Cow::Borrowed(record),
            None => Cow::Owned(DayRecord::synthesized()),
        }
    }

    /// Seed the original default tag library; existing assignments win.
    pub fn seed_default_tags(&mut self) {
        for &(name, category) in DEFAULT_TAGS {
            self.tag_category_map
                .entry(name.to_string())
                .or_insert(category);
        }
    }

    /// Display color for a category, honoring per-document overrides.
    pub fn style_for(&self, category: Category) -> &str {
        self.category_styles
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_color())
    }

    /// Rename a tag and move it to a new category, rewriting every entry
    /// that referenced the old name. Renaming onto an existing other tag is
    /// rejected; keeping the name just updates the category.
    pub fn rename_tag(
        &mut self,
        old_name: &str,
        new_name: &str,
        new_category: Category,
    ) -> Result<(), TagError> {
        if !self.tag_category_map.contains_key(old_name) {
            return Err(TagError::UnknownTag(old_name.to_string()));
        }
        if new_name != old_name && self.tag_category_map.contains_key(new_name) {
            return Err(TagError::DuplicateTag(new_name.to_string()));
        }

        self.tag_category_map.remove(old_name);
        self.tag_category_map
            .insert(new_name.to_string(), new_category);

        for record in self.app_data.values_mut() {
            let Some(entries) = record.entries.as_mut() else {
                continue;
            };
            for entry in entries {
                for tag in entry.tag_names.iter_mut() {
                    if tag == old_name {
                        *tag = new_name.to_string();
                    }
                }
                // An entry can end up naming the tag twice if it carried both
                // the old and the new name.
                let mut seen = Vec::with_capacity(entry.tag_names.len());
                entry.tag_names.retain(|tag| {
                    let keep = !seen.contains(tag);
                    seen.push(tag.clone());
                    keep
                });
            }
        }

        Ok(())
    }

    /// Remove a tag from the library and from every entry. Entries left with
    /// neither tags nor a note are dropped.
    pub fn delete_tag(&mut self, name: &str) -> Result<(), TagError> {
        if self.tag_category_map.remove(name).is_none() {
            return Err(TagError::UnknownTag(name.to_string()));
        }

        for record in self.app_data.values_mut() {
            let Some(entries) = record.entries.as_mut() else {
                continue;
            };
            for entry in entries.iter_mut() {
                entry.tag_names.retain(|tag| tag != name);
            }
            entries.retain(|entry| !entry.tag_names.is_empty() || !entry.note.is_empty());
        }

        Ok(())
    }
}
