use thiserror::Error;

use crate::pipeline::pdf::ArtifactError;
use crate::pipeline::validation::ValidationIssue;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unknown list type: {0}")]
    UnknownListType(String),

    #[error("List type registered twice: {0}")]
    DuplicateRegistration(String),

    #[error("Invalid schema definition '{schema}': {message}")]
    SchemaDefinition { schema: String, message: String },

    #[error("{list_type} failed validation against schema v{schema_version} ({} issue(s))", .issues.len())]
    ValidationFailed {
        list_type: String,
        schema_version: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("Pipeline contract violated for {list_type}: {reason}")]
    ContractViolation { list_type: String, reason: String },

    #[error("Artifact generation failed: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub(crate) fn contract(list_type: &str, reason: impl Into<String>) -> Self {
        PipelineError::ContractViolation {
            list_type: list_type.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
