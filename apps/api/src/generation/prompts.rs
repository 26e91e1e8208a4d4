// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Section header the Output Splitter looks for.
pub const COVER_LETTER_MARKER: &str = "COVER LETTER:";

/// Start of the suggestions header; ends the cover letter section.
pub const CV_IMPROVEMENT_MARKER: &str = "CV IMPROVEMENT";

/// Cover letter + CV tips prompt template.
/// Replace: {tone}, {job_description}, {cv_text}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and technical recruiter.

TASKS:
1) Based on the job description below, write a highly tailored cover letter for the applicant using their CV.
   - The tone of the letter should be: {tone}
   - Keep it to one page equivalent (max ~350 words).
   - Use clear, concise language and specific evidence from the CV that matches job needs.
2) Suggest concrete, bullet-point improvements to the CV so it matches the job better.
   - Focus on measurable impact, keywords, and ordering.

JOB DESCRIPTION:
{job_description}

APPLICANT CV:
{cv_text}

Output format:
---
COVER LETTER:
[Your cover letter]
---
CV IMPROVEMENT SUGGESTIONS:
[Bulleted list]
---"#;
