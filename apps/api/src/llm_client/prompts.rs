// Prompt fragments shared by every evaluator.
// Each evaluator keeps its own templates in evaluation/prompts.rs.

/// Closing instruction appended to every evaluation prompt.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Responde SOLO con un objeto JSON que siga exactamente el esquema anterior, sin texto adicional.";
