use std::path::PathBuf;

use doku_core::Document;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

/// The context served by the bare `/load` and `/save` routes.
pub const DEFAULT_CONTEXT: &str = "default";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unknown context: {0}")]
    UnknownContext(String),
    #[error("context already exists: {0}")]
    ContextExists(String),
    #[error("invalid context id: {0}")]
    InvalidContextId(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode document: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
    pub id: String,
    pub name: String,
}

/// File-per-context JSON store. Documents are written atomically (temp file
/// plus rename); overlapping saves are last-write-wins by contract.
#[derive(Debug)]
pub struct ContextStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl ContextStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load a context's document, normalized. A missing file is an empty
    /// document for the default context and an error for any other id; an
    /// unreadable document degrades to the empty one rather than failing.
    pub async fn load(&self, id: &str) -> Result<Document, StoreError> {
        let path = self.context_path(id)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if id == DEFAULT_CONTEXT {
                    return Ok(Document::default());
                }
                return Err(StoreError::UnknownContext(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let mut document: Document = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(context = id, %err, "stored document unreadable, serving empty");
                Document::default()
            }
        };
        document.normalize();

        Ok(document)
    }

    pub async fn save(&self, id: &str, document: &Document) -> Result<(), StoreError> {
        let path = self.context_path(id)?;
        let json = serde_json::to_vec_pretty(document)?;

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.data_dir).await?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).await?;
        fs::rename(&tmp_path, &path).await?;

        Ok(())
    }

    pub async fn create(&self, id: &str, name: &str) -> Result<(), StoreError> {
        let path = self.context_path(id)?;
        if fs::try_exists(&path).await? {
            return Err(StoreError::ContextExists(id.to_string()));
        }

        let mut document = Document {
            context_name: Some(name.to_string()),
            ..Document::default()
        };
        document.seed_default_tags();

        self.save(id, &document).await
    }

    /// All known contexts, sorted by id. An empty store still reports the
    /// default context.
    pub async fn list(&self) -> Result<Vec<ContextInfo>, StoreError> {
        let mut contexts = Vec::new();

        match fs::read_dir(&self.data_dir).await {
            Ok(mut entries) => {
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("json") {
                        continue;
                    }
                    let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let name = self
                        .load(id)
                        .await
                        .ok()
                        .and_then(|document| document.context_name)
                        .unwrap_or_else(|| display_name(id));
                    contexts.push(ContextInfo {
                        id: id.to_string(),
                        name,
                    });
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        if contexts.is_empty() {
            contexts.push(ContextInfo {
                id: DEFAULT_CONTEXT.to_string(),
                name: display_name(DEFAULT_CONTEXT),
            });
        }
        contexts.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(contexts)
    }

    // Ids double as file names; anything outside lowercase alphanumerics is
    // rejected before it reaches the file system.
    fn context_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !valid {
            return Err(StoreError::InvalidContextId(id.to_string()));
        }

        Ok(self.data_dir.join(format!("{}.json", id)))
    }
}

fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doku_core::{Category, DayRecord, Entry};

    fn temp_store(tag: &str) -> ContextStore {
        let dir = std::env::temp_dir().join(format!("doku-store-{}-{}", std::process::id(), tag));
        let _ = std::fs::remove_dir_all(&dir);
        ContextStore::new(dir)
    }

    #[tokio::test]
    async fn missing_default_context_loads_empty() {
        let store = temp_store("missing-default");
        let document = store.load(DEFAULT_CONTEXT).await.unwrap();
        assert!(document.app_data.is_empty());
        assert!(document.tag_category_map.is_empty());
    }

    #[tokio::test]
    async fn missing_named_context_is_an_error() {
        let store = temp_store("missing-named");
        let err = store.load("arbeit").await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownContext(id) if id == "arbeit"));
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let store = temp_store("round-trip");
        let mut document = Document::default();
        document
            .tag_category_map
            .insert("Messen".to_string(), Category::Technik);
        document.app_data.insert(
            chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            DayRecord {
                entries: Some(vec![Entry {
                    tag_names: vec!["Messen".to_string()],
                    time: 1.5,
                    note: "Aufbau".to_string(),
                }]),
                ..DayRecord::default()
            },
        );

        store.save(DEFAULT_CONTEXT, &document).await.unwrap();
        let loaded = store.load(DEFAULT_CONTEXT).await.unwrap();
        assert_eq!(loaded.tag_category_map["Messen"], Category::Technik);
        assert_eq!(loaded.app_data.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_document_degrades_to_empty() {
        let store = temp_store("corrupt");
        store.save(DEFAULT_CONTEXT, &Document::default()).await.unwrap();
        let path = store.context_path(DEFAULT_CONTEXT).unwrap();
        std::fs::write(&path, b"{ not json").unwrap();

        let document = store.load(DEFAULT_CONTEXT).await.unwrap();
        assert!(document.app_data.is_empty());
    }

    #[tokio::test]
    async fn create_seeds_tags_and_rejects_duplicates() {
        let store = temp_store("create");
        store.create("arbeit", "Arbeit").await.unwrap();

        let document = store.load("arbeit").await.unwrap();
        assert_eq!(document.context_name.as_deref(), Some("Arbeit"));
        assert!(document.tag_category_map.contains_key("Messen"));

        let err = store.create("arbeit", "Arbeit").await.unwrap_err();
        assert!(matches!(err, StoreError::ContextExists(_)));
    }

    #[tokio::test]
    async fn list_reports_contexts_with_display_names() {
        let store = temp_store("list");
        assert_eq!(
            store.list().await.unwrap(),
            vec![ContextInfo {
                id: "default".to_string(),
                name: "Default".to_string(),
            }]
        );

        store.create("arbeit", "Arbeit").await.unwrap();
        store.save("default", &Document::default()).await.unwrap();
        let contexts = store.list().await.unwrap();
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].id, "arbeit");
        assert_eq!(contexts[0].name, "Arbeit");
        assert_eq!(contexts[1].id, "default");
        assert_eq!(contexts[1].name, "Default");
    }

    #[tokio::test]
    async fn context_ids_are_validated() {
        let store = temp_store("ids");
        let err = store.load("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidContextId(_)));
        let err = store.save("Arbeit", &Document::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidContextId(_)));
    }
}
