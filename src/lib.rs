pub mod catalog;
pub mod config;
pub mod error;
pub mod image_prep;
pub mod llm;
pub mod prompt;
pub mod selection;
pub mod simulation;
pub mod utils;

pub use catalog::{HairOption, COLOR_OPTIONS, MEN_CUT_OPTIONS, WOMEN_CUT_OPTIONS};
pub use config::Config;
pub use error::SimulationError;
pub use llm::{GeminiClient, GenerativeBackend, InlineImage};
pub use prompt::{compile, CompiledInstruction};
pub use selection::SelectionState;
pub use simulation::{SimulationOrchestrator, SimulationResult};
