use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::locale::Locale;
use crate::error::{PipelineError, Result};

/// English and Welsh copy for each list type, passed through to the
/// presentation layer untouched.
///
/// On disk this is one `<locale>.json` file per locale holding an object keyed
/// by list type identifier.
#[derive(Debug, Clone, Default)]
pub struct CopyTables {
    tables: HashMap<Locale, Map<String, Value>>,
}

impl CopyTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `en.json` and `cy.json` from `directory`. A missing file leaves that
    /// locale empty; a file that is not a JSON object is an error.
    pub fn load_dir(directory: &Path) -> Result<Self> {
        let mut tables = Self::new();
        for locale in Locale::all() {
            let path = directory.join(format!("{}.json", locale.as_str()));
            if !path.exists() {
                warn!(path = %path.display(), "copy table not found");
                continue;
            }
            let content = fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&content)?;
            tables.insert_locale(locale, value).map_err(|_| {
                PipelineError::Config(format!(
                    "copy table {} must be a JSON object keyed by list type",
                    path.display()
                ))
            })?;
            debug!(path = %path.display(), "copy table loaded");
        }
        Ok(tables)
    }

    /// Add a whole locale table; `Err` hands back a value that is not an object.
    pub fn insert_locale(&mut self, locale: Locale, value: Value) -> std::result::Result<(), Value> {
        match value {
            Value::Object(map) => {
                self.tables.insert(locale, map);
                Ok(())
            }
            other => Err(other),
        }
    }

    /// Copy for `list_type` in `locale`, or `null` when none was supplied.
    pub fn copy_for(&self, list_type: &str, locale: Locale) -> Value {
        self.tables
            .get(&locale)
            .and_then(|table| table.get(list_type))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_tables_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"SJP_PUBLIC_LIST": {"title": "Single Justice Procedure"}}"#).unwrap();
        fs::write(dir.path().join("cy.json"), r#"{"SJP_PUBLIC_LIST": {"title": "Gweithdrefn Un Ynad"}}"#).unwrap();

        let tables = CopyTables::load_dir(dir.path()).unwrap();
        assert_eq!(tables.copy_for("SJP_PUBLIC_LIST", Locale::Cy), json!({"title": "Gweithdrefn Un Ynad"}));
        assert_eq!(tables.copy_for("SJP_PRESS_LIST", Locale::En), Value::Null);
    }

    #[test]
    fn missing_files_leave_locale_empty() {
        let dir = tempfile::tempdir().unwrap();
        let tables = CopyTables::load_dir(dir.path()).unwrap();
        assert_eq!(tables.copy_for("SJP_PUBLIC_LIST", Locale::En), Value::Null);
    }

    #[test]
    fn non_object_tables_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), "[1, 2]").unwrap();
        assert!(matches!(CopyTables::load_dir(dir.path()), Err(PipelineError::Config(_))));
    }
}
