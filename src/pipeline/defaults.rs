/// Per-list-type table of placeholder text for descriptive fields the publisher left blank.
///
/// Only fields named in the table are ever defaulted; everything else passes
/// through as published.
#[derive(Debug, Clone, Copy)]
pub struct FieldDefaults {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldDefaults {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn default_for(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, text)| *text)
    }

    /// The published text, or the declared default when it is missing or blank.
    pub fn text(&self, field: &str, value: Option<&str>) -> String {
        match value.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.default_for(field).unwrap_or_default().to_string(),
        }
    }

    /// Like [`text`](Self::text) for a field published under several names,
    /// taking the first that carries text.
    pub fn first_of<'a>(&self, field: &str, values: impl IntoIterator<Item = Option<&'a str>>) -> String {
        let value = values
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty());
        self.text(field, value)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: FieldDefaults = FieldDefaults::new(&[("caseDetails", "N/A"), ("judge", "To be confirmed")]);

    #[test]
    fn blank_and_missing_values_take_the_declared_default() {
        assert_eq!(TABLE.text("caseDetails", None), "N/A");
        assert_eq!(TABLE.text("caseDetails", Some("   ")), "N/A");
        assert_eq!(TABLE.text("judge", Some("")), "To be confirmed");
    }

    #[test]
    fn published_text_is_trimmed_and_kept() {
        assert_eq!(TABLE.text("caseDetails", Some(" Appeal ")), "Appeal");
    }

    #[test]
    fn first_of_skips_blank_spellings() {
        assert_eq!(TABLE.first_of("caseDetails", [Some(""), Some("A v B")]), "A v B");
        assert_eq!(TABLE.first_of("caseDetails", [Some("Appeal"), Some("A v B")]), "Appeal");
        assert_eq!(TABLE.first_of("caseDetails", [None, Some("  ")]), "N/A");
    }

    #[test]
    fn undeclared_fields_are_not_defaulted() {
        assert_eq!(TABLE.text("venue", None), "");
        assert_eq!(TABLE.default_for("venue"), None);
        assert_eq!(TABLE.fields().collect::<Vec<_>>(), vec!["caseDetails", "judge"]);
    }
}
