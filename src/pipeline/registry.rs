use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use super::document::CanonicalDocument;
use super::locale::Locale;
use super::pdf::{self, PdfArtifact, PdfLayout};
use super::summary::{CaseSummary, Sensitivity};
use super::validation::{SchemaValidator, ValidatedJson, ValidationResult};
use super::view::ViewModel;
use crate::config::PdfConfig;
use crate::error::{PipelineError, Result};

/// Identifies a list type and the schema its publications are validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListTypeDescriptor {
    pub id: &'static str,
    /// English display name, also used as the PDF title
    pub name: &'static str,
    pub schema_name: &'static str,
    pub schema_version: &'static str,
}

/// Per-shape conversion, rendering and summarizing logic.
///
/// Implementations receive documents they produced themselves; anything else
/// is a contract violation and is reported, never coerced.
pub trait ListTypeHandler: Send + Sync {
    /// Map an already validated raw document into its canonical shape.
    fn convert(&self, list_type: &str, raw: &Value) -> Result<CanonicalDocument>;

    fn render(
        &self,
        list_type: &str,
        document: &CanonicalDocument,
        locale: Locale,
    ) -> Result<ViewModel>;

    fn summarize(&self, list_type: &str, document: &CanonicalDocument) -> Result<Vec<CaseSummary>>;

    fn pdf_layout(&self) -> PdfLayout;

    fn sensitivity(&self) -> Sensitivity;
}

/// Everything registered for one list type.
pub struct HandlerBundle {
    descriptor: ListTypeDescriptor,
    validator: SchemaValidator,
    handler: Box<dyn ListTypeHandler>,
}

impl HandlerBundle {
    pub fn descriptor(&self) -> &ListTypeDescriptor {
        &self.descriptor
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.handler.sensitivity()
    }

    pub fn validate(&self, raw: &Value) -> ValidationResult {
        self.validator.validate(raw)
    }

    pub fn validated<'a>(&self, raw: &'a Value) -> Result<ValidatedJson<'a>> {
        self.validator.validated(self.descriptor.id, raw)
    }

    pub fn convert(&self, validated: ValidatedJson<'_>) -> Result<CanonicalDocument> {
        if validated.list_type() != self.descriptor.id {
            return Err(PipelineError::contract(
                self.descriptor.id,
                format!("document was validated as {}", validated.list_type()),
            ));
        }
        self.handler.convert(self.descriptor.id, validated.raw())
    }

    pub fn render(&self, document: &CanonicalDocument, locale: Locale) -> Result<ViewModel> {
        self.handler.render(self.descriptor.id, document, locale)
    }

    pub fn summarize(&self, document: &CanonicalDocument) -> Result<Vec<CaseSummary>> {
        self.handler.summarize(self.descriptor.id, document)
    }

    /// English PDF of the document.
    pub fn to_pdf(&self, document: &CanonicalDocument, config: &PdfConfig) -> Result<PdfArtifact> {
        self.to_pdf_in(document, Locale::En, config)
    }

    /// Render in `locale`, then lay the view out as a PDF.
    pub fn to_pdf_in(
        &self,
        document: &CanonicalDocument,
        locale: Locale,
        config: &PdfConfig,
    ) -> Result<PdfArtifact> {
        let view = self.render(document, locale)?;
        let layout = self.handler.pdf_layout();
        Ok(pdf::write_pdf(self.descriptor.name, &view, &layout, config)?)
    }
}

/// Collects registrations during startup. Frozen into a [`Registry`] by `build`.
#[derive(Default)]
pub struct RegistryBuilder {
    bundles: HashMap<&'static str, HandlerBundle>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a list type. A second registration of the same identifier is
    /// rejected, as is a schema that does not compile.
    pub fn register(
        &mut self,
        descriptor: ListTypeDescriptor,
        schema_source: &str,
        handler: Box<dyn ListTypeHandler>,
    ) -> Result<()> {
        if self.bundles.contains_key(descriptor.id) {
            return Err(PipelineError::DuplicateRegistration(descriptor.id.to_string()));
        }
        let validator = SchemaValidator::compile(
            descriptor.schema_name,
            descriptor.schema_version,
            schema_source,
        )?;
        debug!(
            list_type = descriptor.id,
            schema = descriptor.schema_name,
            version = descriptor.schema_version,
            "registered list type"
        );
        self.bundles.insert(
            descriptor.id,
            HandlerBundle {
                descriptor,
                validator,
                handler,
            },
        );
        Ok(())
    }

    pub fn build(self) -> Registry {
        info!(list_types = self.bundles.len(), "list type registry built");
        Registry {
            bundles: self.bundles,
        }
    }
}

/// Read-only mapping from list type identifier to its handler bundle.
pub struct Registry {
    bundles: HashMap<&'static str, HandlerBundle>,
}

impl Registry {
    /// The registry with every built-in list type.
    pub fn standard() -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        crate::list_types::register_all(&mut builder)?;
        Ok(builder.build())
    }

    pub fn resolve(&self, list_type: &str) -> Option<&HandlerBundle> {
        self.bundles.get(list_type)
    }

    /// Like `resolve`, but an unknown identifier is an error.
    pub fn require(&self, list_type: &str) -> Result<&HandlerBundle> {
        self.resolve(list_type)
            .ok_or_else(|| PipelineError::UnknownListType(list_type.to_string()))
    }

    /// Registered descriptors, sorted by identifier.
    pub fn descriptors(&self) -> Vec<&ListTypeDescriptor> {
        let mut descriptors: Vec<&ListTypeDescriptor> =
            self.bundles.values().map(HandlerBundle::descriptor).collect();
        descriptors.sort_by_key(|d| d.id);
        descriptors
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

static STANDARD_REGISTRY: OnceCell<Registry> = OnceCell::new();

/// Process-wide standard registry, built on first use and read-only afterwards.
pub fn global() -> Result<&'static Registry> {
    STANDARD_REGISTRY.get_or_try_init(Registry::standard)
}
