pub mod config;
pub mod constants;
pub mod error;
pub mod list_types;
pub mod observability;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use pipeline::{ListPipeline, Publication};
