use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, info};

use crate::error::SimulationError;
use crate::llm::{ContentSegment, EditResponse, GenerativeBackend, InlineImage};
use crate::prompt::compile_selection;
use crate::selection::SelectionState;
use crate::utils::timing::SimulationTimer;

pub const ADVICE_FALLBACK: &str = "No se pudo generar un consejo en este momento.";

const EDIT_SYSTEM_PROMPT: &str = r#"Function as a professional hair stylist editor.
Input image provided.
Task: {task}
Constraint: Preserve the person's face identity, skin tone, and background exactly as is. Only modify the hair as requested.
Output: High quality photorealistic image."#;

static RUN_COUNTER: AtomicU64 = AtomicU64::new(1);

pub type GeneratedImage = InlineImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// `None` when the backend answered without an image part.
    pub generated_image: Option<GeneratedImage>,
    pub advice: String,
}

pub fn build_edit_prompt(edit_instruction: &str) -> String {
    EDIT_SYSTEM_PROMPT.replace("{task}", edit_instruction)
}

pub struct SimulationOrchestrator<B> {
    backend: B,
}

impl<B: GenerativeBackend> SimulationOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn simulate(
        &self,
        selection: &SelectionState,
        image: &InlineImage,
    ) -> Result<SimulationResult, SimulationError> {
        let compiled = compile_selection(selection)?;
        self.run(image, &compiled.edit_instruction, &compiled.advice_instruction)
            .await
    }

    pub async fn run(
        &self,
        image: &InlineImage,
        edit_instruction: &str,
        advice_instruction: &str,
    ) -> Result<SimulationResult, SimulationError> {
        let run_id = format!("sim-{}", RUN_COUNTER.fetch_add(1, Ordering::Relaxed));
        let mut timer = SimulationTimer::start(run_id.as_str(), edit_instruction);
        let edit_prompt = build_edit_prompt(edit_instruction);

        let joined = tokio::try_join!(
            self.backend.edit_image(image, &edit_prompt),
            self.backend.advise(image, advice_instruction),
        );

        let (edit_response, advice_response) = match joined {
            Ok(responses) => responses,
            Err(err) => {
                error!("Simulation {} failed: {}", run_id, err);
                timer.complete("error", Some(err.message.as_str()));
                return Err(SimulationError::backend(err.message));
            }
        };

        let generated_image = first_inline_image(edit_response);
        let advice = advice_response
            .text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| ADVICE_FALLBACK.to_string());

        if generated_image.is_none() {
            info!("Simulation {} returned no image; advice only", run_id);
            timer.complete("success", Some("no_image"));
        } else {
            timer.complete("success", None);
        }

        Ok(SimulationResult {
            generated_image,
            advice,
        })
    }
}

fn first_inline_image(response: EditResponse) -> Option<GeneratedImage> {
    response.segments.into_iter().find_map(|segment| match segment {
        ContentSegment::InlineImage(image) if !image.bytes.is_empty() => Some(image),
        _ => None,
    })
}
