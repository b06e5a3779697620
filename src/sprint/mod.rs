pub mod storage;
pub mod types;

pub use storage::{load_sprint, LoadedSprint, SprintRecord};
pub use types::{mean, peak, SprintData};
