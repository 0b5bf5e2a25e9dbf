// Shared prompt fragments.
// Each handler module that calls the model keeps its own prompts.rs alongside it.

/// Appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with the JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
