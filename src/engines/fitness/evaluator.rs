use crate::engines::toolchain::CommandSynthesizer;
use crate::error::Result;
use crate::types::{Individual, ObjectType};
use std::path::Path;

/// Everything an evaluator needs to measure one individual
pub struct EvaluationContext<'a> {
    pub synthesizer: &'a CommandSynthesizer,
    /// Namespaces temporary artifacts when evaluations run concurrently
    pub slot: Option<&'a str>,
}

/// Inputs to the once-per-run baseline step
pub struct PreCacheContext<'a> {
    pub run_folder: &'a Path,
    pub synthesizer: &'a CommandSynthesizer,
    pub cache: bool,
}

/// The fitness protocol for one object type.
///
/// `evaluate` returns `Err` only for misconfiguration. Execution failures are
/// folded into the returned fitness value.
pub trait FitnessEvaluator: Send + Sync {
    fn object_type(&self) -> ObjectType;

    /// Produce whatever artifacts `evaluate` reads. Runs once per run, cached or not.
    fn build(&self, _synthesizer: &CommandSynthesizer) -> Result<()> {
        Ok(())
    }

    /// Measure reference values before any individual is evaluated.
    fn pre_cache(&self, _ctx: &PreCacheContext<'_>) -> Result<()> {
        Ok(())
    }

    fn evaluate(&self, individual: &Individual, ctx: &EvaluationContext<'_>) -> Result<f64>;

    /// Persist a description of an evaluated individual.
    fn cache(&self, _fitness: f64, _individual: &Individual, _cache_file: &Path) -> Result<()> {
        Ok(())
    }
}
