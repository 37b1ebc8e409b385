// LLM prompt constants for achievement extraction from source materials.

/// System prompt for achievement extraction: enforces JSON-only output.
pub const EXTRACT_SYSTEM: &str =
    "You are an expert career coach extracting accomplishments from resumes \
    and career documents into the STAR format. \
    You MUST respond with valid JSON only: a JSON array of achievement objects. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT invent accomplishments not present in the source text.";

/// Extraction prompt template. Replace `{raw_text}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract every distinct professional achievement from the source material below.

Return a JSON ARRAY where each element has this EXACT schema:
[
  {
    "situation": "The checkout service failed under Black Friday load",
    "task": "Make checkout survive 10x seasonal traffic",
    "action": "Rebuilt the order queue on top of Kafka with backpressure",
    "result": "Handled 12k orders/minute with zero dropped carts, a 10x improvement",
    "xyz_accomplishment": "Scaled checkout to 12k orders/minute, measured by zero dropped carts at peak, by rebuilding the order queue on Kafka",
    "company": "Acme Corp",
    "role_title": "Senior Engineer",
    "keywords": ["Kafka", "scalability", "checkout"]
  }
]

Rules:
- One element per distinct accomplishment. Split compound bullets.
- situation / task / action / result must each be a non-empty sentence
  grounded in the source text.
- xyz_accomplishment is a single sentence in Google's "Accomplished X,
  measured by Y, by doing Z" format.
- company and role_title: copy from the surrounding context, or null.
- keywords: 3-6 skills or technologies evidenced by the achievement.
- If the source contains no extractable achievements, return [].

SOURCE MATERIAL:
{raw_text}"#;
