// Mock interview: ask one question for a job description, then evaluate the answer.

pub mod flow;
pub mod handlers;
pub mod prompts;
