// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System message fixing the assistant persona for every generation call.
pub const CAREER_COACH_SYSTEM: &str = "You are a professional career coach.";
