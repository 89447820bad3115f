use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::General,
        Category::World,
        Category::Nation,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Sports,
        Category::Science,
        Category::Health,
    ];

    /// Categories offered for browsing, in display order.
    pub const BROWSABLE: [Category; 8] = [
        Category::Technology,
        Category::Business,
        Category::Science,
        Category::Sports,
        Category::Nation,
        Category::Entertainment,
        Category::Health,
        Category::World,
    ];

    /// Value sent as the `category` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::World => "world",
            Category::Nation => "nation",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Science => "science",
            Category::Health => "health",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "Geral",
            Category::World => "Mundo",
            Category::Nation => "Política",
            Category::Business => "Economia",
            Category::Technology => "Tecnologia",
            Category::Entertainment => "Entretenimento",
            Category::Sports => "Esportes",
            Category::Science => "Ciência",
            Category::Health => "Saúde",
        }
    }

    /// Look up the category whose display label is exactly `label`.
    ///
    /// This decides whether a search term is routed as a category filter or
    /// as free text.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}
