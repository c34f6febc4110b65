//! System prompts shared by every feature. Per-feature user prompts live next to
//! the feature (`resume::prompts`, `cover_letter::prompts`, `insights::prompts`).

/// System prompt for calls whose answer is parsed as JSON.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for calls whose answer is used verbatim as prose.
pub const WRITER_SYSTEM: &str = "You are an expert resume and cover letter writer. \
    Respond with the requested text only, without preamble, headings you were \
    not asked for, or commentary.";
