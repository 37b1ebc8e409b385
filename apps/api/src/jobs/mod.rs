//! Job opportunities, applications, and achievement-to-job matching.

pub mod handlers;
pub mod matcher;
pub mod prompts;
pub mod source;
pub mod status;
