// Built-in list types. Each module registers itself through `register`.

pub mod court_of_appeal_civil;
pub mod daily_cause_list;
pub mod sjp;
pub mod sjp_press;
pub mod sjp_public;
pub mod tribunal_weekly;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::pipeline::document::CanonicalDocument;
use crate::pipeline::registry::RegistryBuilder;

/// Register every built-in list type.
pub fn register_all(builder: &mut RegistryBuilder) -> Result<()> {
    daily_cause_list::register(builder)?;
    court_of_appeal_civil::register(builder)?;
    tribunal_weekly::register(builder)?;
    sjp_public::register(builder)?;
    sjp_press::register(builder)?;
    Ok(())
}

/// Read a validated document into its raw serde shape. Failure here means the
/// document never passed this list type's schema.
fn read_raw<T: DeserializeOwned>(list_type: &str, raw: &Value) -> Result<T> {
    T::deserialize(raw).map_err(|e| {
        PipelineError::contract(list_type, format!("document does not have its schema's shape: {}", e))
    })
}

fn wrong_shape(list_type: &str, expected: &str, document: &CanonicalDocument) -> PipelineError {
    PipelineError::contract(
        list_type,
        format!("expected a {} document, got {}", expected, document.shape()),
    )
}
