use serde::Serialize;
use serde_json::Value;

use super::locale::Locale;

/// Locale-formatted data handed to the presentation layer.
///
/// Section and cell keys are the same in every locale; only values change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub list_type: String,
    pub locale: Locale,
    pub publication_date: Option<String>,
    pub sections: Vec<ViewSection>,
}

impl ViewModel {
    pub fn new(list_type: &str, locale: Locale) -> Self {
        Self {
            list_type: list_type.to_string(),
            locale,
            publication_date: None,
            sections: Vec::new(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    pub fn section(&self, key: &str) -> Option<&ViewSection> {
        self.sections.iter().find(|s| s.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSection {
    pub key: &'static str,
    pub rows: Vec<ViewRow>,
}

impl ViewSection {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewRow {
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    pub fn cell(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.cells.push(ViewCell {
            key,
            value: value.into(),
        });
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewCell {
    pub key: &'static str,
    pub value: String,
}

/// A view plus the opaque copy table for its list type and locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedList {
    pub view: ViewModel,
    pub copy: Value,
}
