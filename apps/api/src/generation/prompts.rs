// Prompt constants for the Generation module.

/// Instruction sent when a generation request carries no prompt (or only
/// whitespace). Kept deliberately loose: the catalog UI supplies its own,
/// more structured prompt, and this is the curl-friendly fallback.
pub const DEFAULT_COURSE_PROMPT: &str = "Generate 3 example programming courses as JSON.";
