// List document pipeline: validate, convert, then render / PDF / summarize

pub mod copy;
pub mod defaults;
pub mod document;
pub mod locale;
pub mod pdf;
pub mod registry;
pub mod summary;
pub mod validation;
pub mod values;
pub mod view;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, info_span, warn};

use crate::config::PdfConfig;
use crate::error::{PipelineError, Result};
use crate::observability::metrics;

// Re-export key types from each stage
pub use copy::CopyTables;
pub use document::CanonicalDocument;
pub use locale::Locale;
pub use pdf::{ArtifactError, PdfArtifact};
pub use registry::{HandlerBundle, ListTypeDescriptor, ListTypeHandler, Registry, RegistryBuilder};
pub use summary::{CaseSummary, Sensitivity};
pub use validation::{ValidationIssue, ValidationResult};
pub use view::{RenderedList, ViewModel};

/// A converted document together with the list type it was validated as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Publication {
    pub list_type: String,
    pub document: CanonicalDocument,
}

/// Entry point for callers: resolves list types and runs each stage.
///
/// Every operation is a pure function of its inputs and the registry, so one
/// pipeline can be shared freely between request handlers.
pub struct ListPipeline<'r> {
    registry: &'r Registry,
    pdf: PdfConfig,
    copy: CopyTables,
}

impl<'r> ListPipeline<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            pdf: PdfConfig::default(),
            copy: CopyTables::default(),
        }
    }

    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn with_copy_tables(mut self, copy: CopyTables) -> Self {
        self.copy = copy;
        self
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn validate(&self, list_type: &str, raw: &Value) -> Result<ValidationResult> {
        let bundle = self.registry.require(list_type)?;
        let result = bundle.validate(raw);
        if result.is_valid() {
            metrics::validation::passed(list_type);
        } else {
            metrics::validation::failed(list_type, result.errors().len());
        }
        Ok(result)
    }

    /// Validate, then convert. Nothing is converted when validation fails.
    pub fn ingest(&self, list_type: &str, raw: &Value) -> Result<Publication> {
        let span = info_span!("ingest", list_type = %list_type);
        let _enter = span.enter();

        let bundle = self.registry.require(list_type)?;
        let validated = match bundle.validated(raw) {
            Ok(validated) => validated,
            Err(err) => {
                if let PipelineError::ValidationFailed { issues, .. } = &err {
                    warn!(issues = issues.len(), "publication rejected by schema");
                    metrics::validation::failed(list_type, issues.len());
                }
                return Err(err);
            }
        };
        metrics::validation::passed(list_type);

        let document = bundle.convert(validated)?;
        let entries = document.entry_count();
        metrics::convert::converted(list_type, entries);
        info!(entries, shape = document.shape(), "publication converted");

        Ok(Publication {
            list_type: bundle.descriptor().id.to_string(),
            document,
        })
    }

    pub fn render(&self, publication: &Publication, locale: Locale) -> Result<RenderedList> {
        let bundle = self.registry.require(&publication.list_type)?;
        let view = bundle.render(&publication.document, locale)?;
        metrics::render::rendered(&publication.list_type, locale.as_str());
        Ok(RenderedList {
            view,
            copy: self.copy.copy_for(&publication.list_type, locale),
        })
    }

    pub fn to_pdf(&self, publication: &Publication) -> Result<PdfArtifact> {
        self.to_pdf_in(publication, Locale::En)
    }

    pub fn to_pdf_in(&self, publication: &Publication, locale: Locale) -> Result<PdfArtifact> {
        let bundle = self.registry.require(&publication.list_type)?;
        match bundle.to_pdf_in(&publication.document, locale, &self.pdf) {
            Ok(artifact) => {
                metrics::pdf::generated(&publication.list_type, artifact.bytes.len(), artifact.pages);
                info!(
                    list_type = %publication.list_type,
                    pages = artifact.pages,
                    sha256 = %artifact.sha256,
                    "pdf artifact generated"
                );
                Ok(artifact)
            }
            Err(err) => {
                metrics::pdf::error(&publication.list_type);
                warn!(list_type = %publication.list_type, error = %err, "pdf generation failed");
                Err(err)
            }
        }
    }

    pub fn summarize(&self, publication: &Publication) -> Result<Vec<CaseSummary>> {
        let bundle = self.registry.require(&publication.list_type)?;
        let summaries = bundle.summarize(&publication.document)?;
        metrics::summary::built(
            &publication.list_type,
            summaries.len(),
            bundle.sensitivity() == Sensitivity::SpecialCategory,
        );
        Ok(summaries)
    }
}
