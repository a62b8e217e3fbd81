#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Select a haircut, a hair color, or describe the change you want.")]
    InsufficientInstructions,
    #[error("Invalid source image: {0}")]
    InvalidImage(String),
    #[error("Simulation failed: {message}")]
    Backend { message: String },
}

impl SimulationError {
    pub fn backend(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return SimulationError::Backend {
                message: GENERIC_BACKEND_FAILURE.to_string(),
            };
        }
        SimulationError::Backend { message }
    }

    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            SimulationError::InsufficientInstructions | SimulationError::InvalidImage(_)
        )
    }
}

pub const GENERIC_BACKEND_FAILURE: &str =
    "The generative backend did not complete the request. Please try again.";
