#![allow(dead_code)]

// Shared prompt constants and prompt-building utilities.
// Each agent stage defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to all tailoring prompts.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every claim you generate must be traceable to a specific achievement ID \
    provided in the evidence. Do NOT infer, interpolate, or invent details. \
    If the evidence does not support a claim, omit it entirely.";
