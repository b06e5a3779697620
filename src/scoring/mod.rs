pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use factors::{ComponentScore, SubScore};
pub use engine::{ScoreBreakdown, SprintValidator, SubScoreBreakdown, ValidationResult};
pub use validation::validate_scoring;
