// LLM prompt constants for the jobs module (JD extraction and matching).

/// System prompt for JD extraction: enforces JSON-only output.
pub const JD_EXTRACT_SYSTEM: &str =
    "You are an expert job description analyst. \
    Extract structured skill and responsibility data from a job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// JD extraction prompt template. Replace `{jd_text}` before sending.
pub const JD_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract structured data from the following job posting.

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Senior Backend Engineer",
  "company": "Acme Corp",
  "location": "Remote",
  "required_skills": ["Rust", "PostgreSQL"],
  "preferred_skills": ["Kubernetes"],
  "key_responsibilities": ["Design and operate ingestion services"],
  "salary_min": 150000,
  "salary_max": 190000
}

Rules:
- required_skills: explicit must-haves: "required", "must have", minimum years.
- preferred_skills: nice-to-haves: "preferred", "bonus", "a plus".
- key_responsibilities: what the person will actually do, one short phrase each.
- salary_min / salary_max: annual figures in the posting's currency, or null if absent.
- Use null for any field the posting does not state. Do NOT invent values.

JOB POSTING:
{jd_text}"#;

/// System prompt for achievement-vs-job match scoring.
pub const MATCH_SYSTEM: &str =
    "You are an expert recruiter scoring how well individual career achievements \
    support a candidacy for one specific job. \
    You MUST respond with valid JSON only: a JSON array. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Match scoring prompt. Replace {job_title}, {required_skills},
/// {preferred_skills}, {key_responsibilities}, {achievements_json}.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Score each achievement below against this job.

JOB: {job_title}
REQUIRED SKILLS: {required_skills}
PREFERRED SKILLS: {preferred_skills}
KEY RESPONSIBILITIES: {key_responsibilities}

ACHIEVEMENTS (score every one, keep the exact achievement_id):
{achievements_json}

Return a JSON ARRAY with one element per achievement:
[
  {
    "achievement_id": "the-exact-uuid-from-input",
    "match_score": 85,
    "reason": "Directly demonstrates the required PostgreSQL and pipeline experience"
  }
]

Scoring rules:
- match_score is 0-100. 70+ means the achievement is direct evidence for a
  required skill or key responsibility. 40-69 means adjacent or partial
  evidence. Below 40 means weak or unrelated.
- reason is one sentence naming the specific requirement the achievement
  supports (or why it does not).
- Never omit an achievement and never invent new achievement_ids."#;
