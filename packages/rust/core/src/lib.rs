//! Orchestration core for Playscout: strategy sequencing, the timed
//! interactive gate, result persistence, and the end-to-end pipeline.

pub mod gate;
pub mod orchestrator;
pub mod persist;
pub mod pipeline;

pub use gate::TimedStdinGate;
pub use orchestrator::{Orchestrator, PassOutcome};
pub use pipeline::resolve;
