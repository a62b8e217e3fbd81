use crate::catalog::HairOption;
use crate::error::SimulationError;
use crate::selection::SelectionState;

pub const KEEP_COLOR_CLAUSE: &str = "Keep the hair color natural and unchanged.";
pub const KEEP_STYLE_CLAUSE: &str = "Keep the hairstyle, length, and texture exactly the same.";
const ADDITIONAL_DETAILS_PREFIX: &str = "Additional details: ";
const DEFAULT_INTENT: &str = "a general style change";

pub const ADVICE_SYSTEM_PROMPT: &str = r#"Act as a top-level professional hair stylist.
Analyze the face shape and features of the person in the attached image.

The user wants to try: {intent}

Give a brief piece of advice (80 words maximum) written in Spanish:
1. Briefly assess whether this cut/color combination suits their face.
2. One key maintenance tip for this specific look.

Be friendly, positive, and professional."#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub edit_instruction: String,
    pub advice_instruction: String,
}

pub fn compile_selection(
    selection: &SelectionState,
) -> Result<CompiledInstruction, SimulationError> {
    compile(selection.cut(), selection.color(), selection.detail())
}

/// Preservation clauses are only added when `free_text` is blank.
pub fn compile(
    cut: Option<&HairOption>,
    color: Option<&HairOption>,
    free_text: &str,
) -> Result<CompiledInstruction, SimulationError> {
    let free_text = free_text.trim();
    let edit_instruction = build_edit_instruction(cut, color, free_text);
    if edit_instruction.is_empty() {
        return Err(SimulationError::InsufficientInstructions);
    }

    Ok(CompiledInstruction {
        edit_instruction,
        advice_instruction: build_advice_instruction(cut, color, free_text),
    })
}

fn build_edit_instruction(
    cut: Option<&HairOption>,
    color: Option<&HairOption>,
    free_text: &str,
) -> String {
    let mut instructions: Vec<String> = Vec::new();

    if let Some(cut) = cut {
        instructions.push(cut.prompt_modifier.to_string());
    }
    if let Some(color) = color {
        instructions.push(color.prompt_modifier.to_string());
    }
    if !free_text.is_empty() {
        instructions.push(format!("{ADDITIONAL_DETAILS_PREFIX}{free_text}"));
    }

    if free_text.is_empty() {
        match (cut.is_some(), color.is_some()) {
            (true, false) => instructions.push(KEEP_COLOR_CLAUSE.to_string()),
            (false, true) => instructions.push(KEEP_STYLE_CLAUSE.to_string()),
            _ => {}
        }
    }

    instructions.join(" ")
}

fn build_intent_summary(
    cut: Option<&HairOption>,
    color: Option<&HairOption>,
    free_text: &str,
) -> String {
    let mut parts = Vec::new();
    if let Some(cut) = cut {
        parts.push(format!("Cut: {}.", cut.name));
    }
    if let Some(color) = color {
        parts.push(format!("Color: {}.", color.name));
    }
    if !free_text.is_empty() {
        parts.push(format!("Extra: {free_text}."));
    }

    if parts.is_empty() {
        DEFAULT_INTENT.to_string()
    } else {
        parts.join(" ")
    }
}

fn build_advice_instruction(
    cut: Option<&HairOption>,
    color: Option<&HairOption>,
    free_text: &str,
) -> String {
    ADVICE_SYSTEM_PROMPT.replace("{intent}", &build_intent_summary(cut, color, free_text))
}
