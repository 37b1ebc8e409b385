//! The agent pipeline: Scout → Profiler → Qualifier → Hunter → Tailor →
//! Scribe → Assembler.
//!
//! Stages are independent, idempotent transformations invoked per
//! application; the HTTP layer persists each stage's output before the next
//! runs. There is no scheduler and no cross-stage rollback: retrying a
//! stage is a manual re-invocation.

pub mod assembler;
pub mod handlers;
pub mod prompts;
pub mod stages;
