// All LLM prompt constants for the Matching module.

/// Judgment prompt template. Replace `{resume}`, `{job_description}` and `{dimension}` before sending.
pub const JUDGMENT_PROMPT_TEMPLATE: &str = "Given the resume: {resume}
The job description: {job_description}
Calculate how well the candidate's {dimension} matches the job requirements.
Provide a single numerical score between 0 and 1, where 0 means no match and 1 means a perfect match.
Only return the numerical score without any explanation.";

/// Fills the judgment template for one dimension.
pub fn build_judgment_prompt(resume: &str, job_description: &str, dimension: &str) -> String {
    // dimension goes first: it is a fixed label and cannot contain the other placeholders
    JUDGMENT_PROMPT_TEMPLATE
        .replace("{dimension}", dimension)
        .replacen("{resume}", resume, 1)
        .replacen("{job_description}", job_description, 1)
}
