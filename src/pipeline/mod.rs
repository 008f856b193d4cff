mod chain;
mod driver;
mod encounter;
mod error;

pub use driver::{Pipeline, RunSummary};
pub use encounter::EncounterData;
pub use error::PipelineError;
