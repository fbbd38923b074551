use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Calendar format used for entry dates and day keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl Category {
    /// Declaration order; category summaries and chart slices follow it.
    pub const ALL: [Category; 4] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Snacks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged food item, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub comment: String,
    pub kcal: f64,
    pub category: Category,
}

/// Calorie value as submitted: a form field is text, a JSON body may carry a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KcalInput {
    Number(f64),
    Text(String),
    /// Any other JSON shape; never a valid calorie value.
    Other(serde::de::IgnoredAny),
}

impl KcalInput {
    /// Finite numeric value, or `None` when the input is not a well-formed number.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            KcalInput::Number(value) => *value,
            KcalInput::Text(text) => text.trim().parse::<f64>().ok()?,
            KcalInput::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// User input for a new entry. The date is never taken from the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryDraft {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub kcal: Option<KcalInput>,
    #[serde(default)]
    pub category: Category,
}

impl EntryDraft {
    pub fn new(comment: impl Into<String>, kcal: KcalInput, category: Category) -> Self {
        Self {
            comment: comment.into(),
            kcal: Some(kcal),
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub kcal: f64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub by_day: BTreeMap<String, f64>,
    pub by_category: [CategoryTotal; 4],
}
