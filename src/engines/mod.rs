pub mod benchmark;
pub mod fitness;
pub mod reporting;
pub mod session;
pub mod toolchain;

pub use session::{EvaluationRecord, EvaluationSession, RunSummary};
