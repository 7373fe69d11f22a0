use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
}

/// A project that todos can point at (by id, weakly).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Weak reference; the project may have been deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub tag_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_defaults_fill_missing_fields() {
        let todo: Todo = serde_json::from_str(r#"{"text":"Messreihe auswerten"}"#).unwrap();
        assert_eq!(todo.priority, Priority::Medium);
        assert!(!todo.completed);
        assert_eq!(todo.due_date, None);
        assert_eq!(todo.project_id, None);
        assert!(todo.tag_names.is_empty());
    }

    #[test]
    fn todo_round_trips_with_project_reference() {
        let json = r#"{"id":"t1","text":"Bericht","completed":true,"priority":"high",
                       "dueDate":"2024-06-07","projectId":"p1","tagNames":["Dokumentieren"]}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.project_id.as_deref(), Some("p1"));
        assert_eq!(
            todo.due_date,
            Some(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap())
        );
        let back = serde_json::to_string(&todo).unwrap();
        assert!(back.contains("\"dueDate\":\"2024-06-07\""));
    }
}
