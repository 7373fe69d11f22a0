use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The fixed category set used for coloring and the radar chart. Wire values
/// are the original German labels; unknown values degrade to `Sonstiges`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString,
)]
pub enum Category {
    Technik,
    Analyse,
    Dokumentation,
    Organisation,
    Soziales,
    #[serde(other)]
    Sonstiges,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Technik,
        Category::Analyse,
        Category::Dokumentation,
        Category::Organisation,
        Category::Soziales,
        Category::Sonstiges,
    ];

    /// Categories plotted on the radar chart; `Sonstiges` is excluded.
    pub const RADAR: [Category; 5] = [
        Category::Technik,
        Category::Analyse,
        Category::Dokumentation,
        Category::Organisation,
        Category::Soziales,
    ];

    /// Built-in display color, overridable per document via `categoryStyles`.
    pub fn default_color(self) -> &'static str {
        match self {
            Category::Technik => "rgba(239, 68, 68, 0.8)",
            Category::Analyse => "rgba(59, 130, 246, 0.8)",
            Category::Dokumentation => "rgba(245, 158, 11, 0.8)",
            Category::Organisation => "rgba(16, 185, 129, 0.8)",
            Category::Soziales => "rgba(139, 92, 246, 0.8)",
            Category::Sonstiges => "rgba(107, 114, 128, 0.8)",
        }
    }
}

/// Tag seed for a freshly created context.
pub const DEFAULT_TAGS: &[(&str, Category)] = &[
    ("Messen", Category::Technik),
    ("Programmieren", Category::Technik),
    ("Simuliert", Category::Analyse),
    ("Analysieren", Category::Analyse),
    ("Berechnen (Herleiten)", Category::Analyse),
    ("Lesen von Dokumenten", Category::Analyse),
    ("Dokumentieren", Category::Dokumentation),
    ("Tabellen ausfüllen", Category::Dokumentation),
    ("Bachelorarbeit schreiben", Category::Dokumentation),
    ("Orga", Category::Dokumentation),
    ("Planung", Category::Organisation),
    ("Meetings", Category::Organisation),
    ("System einrichten", Category::Organisation),
    ("Soziales", Category::Soziales),
    ("Mitarbeiter gespräch", Category::Soziales),
];
