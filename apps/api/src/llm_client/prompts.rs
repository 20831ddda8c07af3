// Shared prompt fragments. Each feature module keeps its own prompts.rs;
// this file holds what every call has in common.

/// System instruction sent with every chat call.
pub const DESIGNER_SYSTEM: &str = "You are an expert UI/UX designer and frontend developer. \
    Provide practical, modern, and accessible design solutions.";

/// Appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON value.";

/// Appended to scoring prompts so the reply parses as a number.
pub const SCORE_ONLY_INSTRUCTION: &str =
    "Respond with the numeric score only, for example: 7.5";
