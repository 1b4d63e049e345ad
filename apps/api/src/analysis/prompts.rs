// All LLM prompt constants for the analysis pipeline.

/// Per-platform summary prompt. Replace `{platform_name}` and `{profile_text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"
As a senior tech recruiter, analyze the following raw text taken from a candidate's {platform_name} profile.
Summarize the key technical skills, programming languages, and project themes you observe.
Be concise (at most 3-4 sentences) and focus on distinctive skills that show practical application.

Raw Profile Data:
---
{profile_text}
---
"#;

/// Header placed between the résumé text and the profile summaries in the corpus.
pub const SUMMARIES_HEADER: &str = "\n\n--- External Profile Summaries ---\n";

/// Synthesis instructions. Sent as the first part; the corpus follows as the second.
pub const SKILL_PROFILE_PROMPT: &str = r#"
You are an expert talent analyst and career coach. Analyze the CV text AND the summaries of the candidate's online profiles provided below, and produce one comprehensive skill profile.

Follow these instructions PRECISELY:

1.  **Professional Summary:** Write a strong 2-3 sentence summary of the candidate's core strengths, drawing on ALL available information.
2.  **Filtering and Prioritization (VERY IMPORTANT):**
    *   **Marketable skills first:** Prioritize skills that job descriptions commonly ask for (e.g., Python, React, AWS, Docker, Project Management, SQL).
    *   **Ignore noise:** Leave out hyper-niche, academic, or single-mention tools and libraries from one specific project (e.g., 'scikit-maad', 'VGGish', 'PANNs') UNLESS they are central to a major project. Highlight core talents; do not list every imported library.
    *   **Group related tools:** When several small libraries serve one purpose, report the higher-level skill instead (e.g., "Data Visualization" rather than three plotting libraries).
3.  **Skill Object:** Every skill is an object with `skill`, `confidence` (exactly one of 'High', 'Medium', 'Low'), and `evidence`.
4.  **Brief Evidence:** Keep `evidence` very short: keywords or sentence fragments such as 'CV: Data pipeline project', 'GitHub: NLP repo', 'Portfolio: Data Viz section'.
5.  **Output Format:** Return a single valid and COMPLETE JSON object with exactly the structure shown below. Write nothing before or after the JSON block. Start your response directly with ```json.

**Required JSON Structure Example:**
```json
{
  "professional_summary": "A concise summary of the candidate's strengths...",
  "technical_skills": [
    {"skill": "Python", "confidence": "High", "evidence": "CV: Data pipeline project"}
  ],
  "soft_skills": [
    {"skill": "Communication", "confidence": "Medium", "evidence": "CV: Presented to stakeholders"}
  ],
  "tools_and_technologies": [
    {"skill": "Docker", "confidence": "High", "evidence": "GitHub: Containerized app"}
  ]
}
```
"#;

/// Output budget for the synthesis call; the JSON for a rich profile is long.
pub const SYNTHESIS_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const SYNTHESIS_TEMPERATURE: f32 = 0.1;
