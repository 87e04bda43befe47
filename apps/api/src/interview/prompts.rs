// Interview coach LLM prompt templates.

pub const QUESTION_PROMPT: &str = r#"You are a professional technical interviewer.
Based on the following job description, generate one relevant interview question.
Reply with the question only.

Job Description:
{job_description}"#;

pub const FEEDBACK_PROMPT: &str = r#"You are an interview coach. Evaluate the following answer for the question below.
Provide a short constructive feedback and score (1-10).

Job Description:
{job_description}

Question: {question}
Answer: {answer}"#;

pub const FALLBACK_QUESTION: &str =
    "Tell me about a challenging project you worked on and the impact it had.";

pub const NO_FEEDBACK_FALLBACK: &str = "No feedback generated.";
