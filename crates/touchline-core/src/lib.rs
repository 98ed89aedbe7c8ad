// Core types for the coaching advice service: the request/response payloads,
// defensive stat record access, and prompt templates.

pub mod payload;
pub mod prompt;
pub mod stats;
