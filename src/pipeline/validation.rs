use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Broad class of a schema violation.
///
/// A missing required field and a present field of the wrong type are reported
/// as different kinds so callers can phrase field-level feedback differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingField,
    TypeMismatch,
    DisallowedValue,
    UnexpectedField,
    Other,
}

/// One schema violation, located by JSON pointer into the submitted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "(root)" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Outcome of validating a raw document. `valid` holds exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationIssue> {
        self.errors
    }
}

/// Proof that a raw document passed validation for one list type.
///
/// Only [`SchemaValidator::validated`] constructs this, so converters can
/// never be handed a document that skipped the validation gate.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<'a> {
    list_type: &'static str,
    raw: &'a Value,
}

impl<'a> ValidatedJson<'a> {
    pub fn list_type(&self) -> &'static str {
        self.list_type
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }
}

/// A compiled JSON Schema together with the name and version it was published under.
pub struct SchemaValidator {
    name: &'static str,
    version: &'static str,
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// Compile a bundled schema document. A schema that does not parse or compile
    /// is a packaging defect and is reported as `SchemaDefinition`.
    pub fn compile(name: &'static str, version: &'static str, source: &str) -> Result<Self> {
        let schema: Value =
            serde_json::from_str(source).map_err(|e| PipelineError::SchemaDefinition {
                schema: format!("{}@{}", name, version),
                message: format!("schema is not valid JSON: {}", e),
            })?;

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| PipelineError::SchemaDefinition {
                schema: format!("{}@{}", name, version),
                message: e.to_string(),
            })?;

        Ok(Self {
            name,
            version,
            compiled,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Check `raw` against the schema. Never fails; every violation becomes an issue.
    pub fn validate(&self, raw: &Value) -> ValidationResult {
        let issues = match self.compiled.validate(raw) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    let mut path = error.instance_path.to_string();
                    let kind = match &error.kind {
                        ValidationErrorKind::Required { property } => {
                            // Point at the missing field rather than its parent object
                            if let Some(name) = property.as_str() {
                                path.push('/');
                                path.push_str(name);
                            }
                            IssueKind::MissingField
                        }
                        ValidationErrorKind::Type { .. } => IssueKind::TypeMismatch,
                        ValidationErrorKind::Enum { .. } | ValidationErrorKind::Constant { .. } => {
                            IssueKind::DisallowedValue
                        }
                        ValidationErrorKind::AdditionalProperties { .. } => {
                            IssueKind::UnexpectedField
                        }
                        _ => IssueKind::Other,
                    };
                    ValidationIssue {
                        path,
                        message: error.to_string(),
                        kind,
                    }
                })
                .collect(),
        };

        debug!(
            schema = self.name,
            version = self.version,
            issues = issues.len(),
            "schema validation finished"
        );
        ValidationResult::from_issues(issues)
    }

    /// Validate and, on success, issue the token that unlocks conversion.
    pub fn validated<'a>(
        &self,
        list_type: &'static str,
        raw: &'a Value,
    ) -> Result<ValidatedJson<'a>> {
        let result = self.validate(raw);
        if result.is_valid() {
            Ok(ValidatedJson { list_type, raw })
        } else {
            Err(PipelineError::ValidationFailed {
                list_type: list_type.to_string(),
                schema_version: self.version.to_string(),
                issues: result.into_errors(),
            })
        }
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("name", &self.name)
            .field("version", &self.version)
            .finish()
    }
}
