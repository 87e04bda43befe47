// Resume analysis LLM prompts.

pub const RESUME_REVIEW_SYSTEM: &str = "\
You are an expert career advisor and resume reviewer. \
Provide concise, actionable feedback about resume structure, clarity, \
and relevance to job applications.";

pub const RESUME_REVIEW_PROMPT: &str = r#"Review the following resume.

A keyword check scored it {score}/100 and raised these notes:
{tips}

RESUME:
{resume_text}

Give concise, actionable feedback as a short list of improvements."#;

pub const NO_FEEDBACK_FALLBACK: &str = "No feedback generated.";
