pub mod dispatcher;
pub mod evaluator;
pub mod llvm_pass;
pub mod memo;
pub mod placeholder;

pub use dispatcher::FitnessDispatcher;
pub use evaluator::{EvaluationContext, FitnessEvaluator, PreCacheContext};
pub use llvm_pass::LlvmPassEvaluator;
pub use memo::FitnessMemo;
pub use placeholder::PlaceholderEvaluator;
