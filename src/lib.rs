pub mod config;
pub mod output;
pub mod profile;
pub mod scoring;
pub mod sprint;
pub mod stderr_buffer;

pub use scoring::{ScoringConfig, SprintValidator, ValidationResult};
pub use sprint::SprintData;
