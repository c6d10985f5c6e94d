//! Pipeline metrics recorded through the `metrics` facade.
//!
//! Nothing is exported from here; the embedding service installs whatever
//! recorder it uses. Without one every call is a no-op.

use std::fmt;

/// Enum representing all metric names used by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    ValidationPassed,
    ValidationFailed,
    ValidationIssues,
    DocumentsConverted,
    ConvertedEntries,
    ViewsRendered,
    SummariesBuilt,
    SummariesRedacted,
    PdfArtifactsGenerated,
    PdfArtifactErrors,
    PdfArtifactBytes,
    PdfArtifactPages,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ValidationPassed => "court_lists_validation_passed_total",
            MetricName::ValidationFailed => "court_lists_validation_failed_total",
            MetricName::ValidationIssues => "court_lists_validation_issues",
            MetricName::DocumentsConverted => "court_lists_documents_converted_total",
            MetricName::ConvertedEntries => "court_lists_converted_entries",
            MetricName::ViewsRendered => "court_lists_views_rendered_total",
            MetricName::SummariesBuilt => "court_lists_summaries_built_total",
            MetricName::SummariesRedacted => "court_lists_summaries_redacted_total",
            MetricName::PdfArtifactsGenerated => "court_lists_pdf_artifacts_generated_total",
            MetricName::PdfArtifactErrors => "court_lists_pdf_artifact_errors_total",
            MetricName::PdfArtifactBytes => "court_lists_pdf_artifact_bytes",
            MetricName::PdfArtifactPages => "court_lists_pdf_artifact_pages",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            ValidationPassed,
            ValidationFailed,
            ValidationIssues,
            DocumentsConverted,
            ConvertedEntries,
            ViewsRendered,
            SummariesBuilt,
            SummariesRedacted,
            PdfArtifactsGenerated,
            PdfArtifactErrors,
            PdfArtifactBytes,
            PdfArtifactPages,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod validation {
    use super::MetricName;

    pub fn passed(list_type: &str) {
        ::metrics::counter!(MetricName::ValidationPassed.as_str(), "list_type" => list_type.to_string()).increment(1);
    }

    pub fn failed(list_type: &str, issues: usize) {
        ::metrics::counter!(MetricName::ValidationFailed.as_str(), "list_type" => list_type.to_string()).increment(1);
        ::metrics::histogram!(MetricName::ValidationIssues.as_str(), "list_type" => list_type.to_string()).record(issues as f64);
    }
}

pub mod convert {
    use super::MetricName;

    pub fn converted(list_type: &str, entries: usize) {
        ::metrics::counter!(MetricName::DocumentsConverted.as_str(), "list_type" => list_type.to_string()).increment(1);
        ::metrics::histogram!(MetricName::ConvertedEntries.as_str(), "list_type" => list_type.to_string()).record(entries as f64);
    }
}

pub mod render {
    use super::MetricName;

    pub fn rendered(list_type: &str, locale: &'static str) {
        ::metrics::counter!(
            MetricName::ViewsRendered.as_str(),
            "list_type" => list_type.to_string(),
            "locale" => locale
        )
        .increment(1);
    }
}

pub mod summary {
    use super::MetricName;

    pub fn built(list_type: &str, count: usize, redacted: bool) {
        ::metrics::counter!(MetricName::SummariesBuilt.as_str(), "list_type" => list_type.to_string()).increment(count as u64);
        if redacted {
            ::metrics::counter!(MetricName::SummariesRedacted.as_str(), "list_type" => list_type.to_string()).increment(count as u64);
        }
    }
}

pub mod pdf {
    use super::MetricName;

    pub fn generated(list_type: &str, bytes: usize, pages: usize) {
        ::metrics::counter!(MetricName::PdfArtifactsGenerated.as_str(), "list_type" => list_type.to_string()).increment(1);
        ::metrics::histogram!(MetricName::PdfArtifactBytes.as_str()).record(bytes as f64);
        ::metrics::histogram!(MetricName::PdfArtifactPages.as_str()).record(pages as f64);
    }

    pub fn error(list_type: &str) {
        ::metrics::counter!(MetricName::PdfArtifactErrors.as_str(), "list_type" => list_type.to_string()).increment(1);
    }
}
