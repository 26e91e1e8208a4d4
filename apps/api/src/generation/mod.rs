// Cover letter generation: tone, model catalog, prompt composition,
// keyword gaps, the pipeline itself and its HTTP handlers.
// All LLM calls go through the llm_client::TextGenerator seam.

pub mod generator;
pub mod handlers;
pub mod keyword_gaps;
pub mod models;
pub mod prompts;
pub mod splitter;
pub mod tone;
