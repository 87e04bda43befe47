// Resume analysis: heuristic scoring, model feedback, persistence.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod feedback;
pub mod handlers;
pub mod heuristic;
pub mod pipeline;
pub mod prompts;
