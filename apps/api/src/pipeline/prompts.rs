// LLM prompt constants for the agent pipeline stages.

/// System prompt for the Profiler stage.
pub const PROFILER_SYSTEM: &str =
    "You are a career strategist comparing a candidate's verified achievements \
    against one job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Profiler prompt. Replace {job_json}, {achievements_json}.
pub const PROFILER_PROMPT_TEMPLATE: &str = r#"Compare the candidate's achievements against this job posting.

JOB:
{job_json}

ACHIEVEMENTS (verified: the only evidence you may use):
{achievements_json}

Return a JSON object with this EXACT schema:
{
  "summary": "One paragraph on how this candidate's record maps to the role",
  "aligned_strengths": ["Required Kafka experience evidenced by the checkout rebuild"],
  "evident_gaps": ["No people-management evidence for the team-lead responsibility"]
}

Rules:
- aligned_strengths and evident_gaps reference specific requirements and
  specific achievements. No generic filler.
- Do NOT invent experience the achievements do not show."#;

/// System prompt for the Qualifier stage.
pub const QUALIFIER_SYSTEM: &str =
    "You are a pragmatic recruiter deciding whether a candidate should invest \
    time applying to one job. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Qualifier prompt. Replace {job_json}, {digest_json}.
pub const QUALIFIER_PROMPT_TEMPLATE: &str = r#"Decide whether this candidacy is worth pursuing.

JOB:
{job_json}

PROFILER DIGEST (strengths and gaps already identified):
{digest_json}

Return a JSON object with this EXACT schema:
{
  "score": 72,
  "rationale": "Strong infrastructure overlap; the missing healthcare domain is coachable",
  "verdict": "pursue"
}

Rules:
- score is 0-100: likelihood this application leads to an interview.
- verdict is exactly "pursue" or "skip"; scores under 40 should be "skip".
- rationale is 1-3 sentences of strategy, not a restatement of the digest."#;

/// System prompt for the Hunter stage.
pub const HUNTER_SYSTEM: &str =
    "You identify the most likely hiring contacts for a job posting based on \
    its company, team, and seniority signals. \
    You MUST respond with valid JSON only: a JSON array. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Hunter prompt. Replace {job_json}.
pub const HUNTER_PROMPT_TEMPLATE: &str = r#"Identify likely hiring contacts for this posting.

JOB:
{job_json}

Return a JSON ARRAY (up to 3 elements):
[
  {
    "name": "Likely role holder, or null if unknowable",
    "title": "Engineering Manager, Payments",
    "search_hint": "site:linkedin.com \"Copperline Financial\" \"Engineering Manager\" payments",
    "confidence": 0.6
  }
]

Rules:
- Prefer the hiring manager and a senior recruiter over executives.
- name is usually null: never fabricate a real person's name. The value of
  this stage is the title and the search_hint.
- confidence is 0.0-1.0."#;

/// System prompt for the Tailor stage.
pub const TAILOR_SYSTEM: &str =
    "You are an expert resume writer producing a tailored resume body from \
    verified achievements for one specific job. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts not present in the evidence.";

/// Tailor prompt. Replace {job_json}, {evidence_json}, {grounding}.
pub const TAILOR_PROMPT_TEMPLATE: &str = r###"{grounding}

Write a tailored resume body for this job from the evidence achievements.

JOB:
{job_json}

EVIDENCE (pre-selected strong matches: the only source of claims):
{evidence_json}

Return a JSON object with this EXACT schema:
{
  "resume_markdown": "## Experience\n- Scaled checkout to 12k orders/minute ...",
  "confidence": 78,
  "missing_keywords": ["Terraform", "HIPAA"]
}

Rules:
- resume_markdown: achievement bullets in XYZ phrasing, grouped by role,
  JD keywords woven in naturally. No keyword stuffing.
- confidence is 0-100: how convincingly the evidence covers the JD.
- missing_keywords: JD requirements the evidence does not cover."###;

/// System prompt for the Scribe stage.
pub const SCRIBE_SYSTEM: &str =
    "You write concise, specific job-application outreach. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts not present in the evidence.";

/// Scribe prompt. Replace {job_json}, {evidence_json}.
pub const SCRIBE_PROMPT_TEMPLATE: &str = r#"Write application outreach for this job from the evidence achievements.

JOB:
{job_json}

EVIDENCE:
{evidence_json}

Return a JSON object with this EXACT schema:
{
  "cover_letter": "Three short paragraphs: hook, proof, close.",
  "linkedin_message": "Under 300 characters, references one specific achievement."
}

Rules:
- The cover letter cites at most two achievements, by outcome, with numbers.
- No flattery boilerplate ("I was excited to see..."). Lead with relevance.
- The LinkedIn message must stand alone without the cover letter."#;
