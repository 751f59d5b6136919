//! Per-candidate processing pipeline: two-phase scatter-gather over the
//! extraction operations, aggregate assembly, and the route handlers that
//! expose them.

pub mod assemble;
pub mod handlers;
pub mod orchestrator;
pub mod sanitize;
