use serde::Serialize;

use crate::constants::{SPECIAL_CATEGORY_DATA_WARNING, SPECIAL_CATEGORY_NOTICE_LABEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: String,
}

/// Digest line-item for one case or hearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseSummary {
    pub fields: Vec<SummaryField>,
}

impl CaseSummary {
    /// The standard notice that replaces a whole entry from a special category list.
    pub fn redacted() -> Self {
        Self {
            fields: vec![SummaryField {
                label: SPECIAL_CATEGORY_NOTICE_LABEL,
                value: SPECIAL_CATEGORY_DATA_WARNING.to_string(),
            }],
        }
    }

    pub fn is_redacted(&self) -> bool {
        *self == Self::redacted()
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    /// `label - value` lines, as they appear in a digest email.
    pub fn digest_line(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{} - {}", f.label, f.value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    Public,
    SpecialCategory,
}

/// A field a list type allows into digests, with its digest label.
pub trait DigestField: Copy + 'static {
    fn label(self) -> &'static str;
}

/// Which fields of a list type may reach a digest, and whether the list is special category.
#[derive(Debug, Clone, Copy)]
pub struct SummaryPolicy<F: 'static> {
    pub sensitivity: Sensitivity,
    pub fields: &'static [F],
}

impl<F: DigestField> SummaryPolicy<F> {
    /// One summary per entry, in entry order. Special category lists get the
    /// redaction notice for every entry and `value` is never consulted.
    pub fn summarize<E>(
        &self,
        entries: impl IntoIterator<Item = E>,
        value: impl Fn(&E, F) -> String,
    ) -> Vec<CaseSummary> {
        match self.sensitivity {
            Sensitivity::SpecialCategory => entries
                .into_iter()
                .map(|_| CaseSummary::redacted())
                .collect(),
            Sensitivity::Public => entries
                .into_iter()
                .map(|entry| CaseSummary {
                    fields: self
                        .fields
                        .iter()
                        .map(|&field| SummaryField {
                            label: field.label(),
                            value: value(&entry, field),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Digest body text for a whole list: one block per case, blank line between.
pub fn digest_text(summaries: &[CaseSummary]) -> String {
    summaries
        .iter()
        .map(CaseSummary::digest_line)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Field {
        Number,
        Name,
    }

    impl DigestField for Field {
        fn label(self) -> &'static str {
            match self {
                Field::Number => "Case number",
                Field::Name => "Case name",
            }
        }
    }

    const FIELDS: &[Field] = &[Field::Number, Field::Name];

    fn extract(entry: &(&str, &str), field: Field) -> String {
        match field {
            Field::Number => entry.0.to_string(),
            Field::Name => entry.1.to_string(),
        }
    }

    #[test]
    fn public_lists_keep_whitelisted_fields_in_order() {
        let policy = SummaryPolicy { sensitivity: Sensitivity::Public, fields: FIELDS };
        let summaries = policy.summarize(vec![("CN1", "A v B"), ("CN2", "C v D")], extract);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].value("Case number"), Some("CN1"));
        assert_eq!(summaries[1].value("Case name"), Some("C v D"));
        assert_eq!(summaries[0].digest_line(), "Case number - CN1\nCase name - A v B");
    }

    #[test]
    fn special_category_lists_are_wholly_redacted() {
        let policy = SummaryPolicy { sensitivity: Sensitivity::SpecialCategory, fields: FIELDS };
        let summaries = policy.summarize(vec![("CN1", "A v B"), ("CN2", "C v D")], extract);
        assert_eq!(summaries.len(), 2);
        for summary in &summaries {
            assert!(summary.is_redacted());
            assert!(!summary.digest_line().contains("CN"));
        }
    }

    #[test]
    fn digest_text_separates_cases() {
        let policy = SummaryPolicy { sensitivity: Sensitivity::Public, fields: &[Field::Number][..] };
        let summaries = policy.summarize(vec![("CN1", ""), ("CN2", "")], extract);
        assert_eq!(digest_text(&summaries), "Case number - CN1\n\nCase number - CN2");
    }
}
