//! Master Profile: achievements, source materials, and the deterministic
//! scoring/dedup core that sits underneath extraction.

pub mod dedup;
pub mod handlers;
pub mod impact;
pub mod ingest;
pub mod prompts;
pub mod similarity;
