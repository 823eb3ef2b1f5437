use super::evaluator::{EvaluationContext, FitnessEvaluator, PreCacheContext};
use super::llvm_pass::LlvmPassEvaluator;
use super::placeholder::PlaceholderEvaluator;
use crate::engines::toolchain::CommandSynthesizer;
use crate::error::Result;
use crate::types::{Individual, ObjectType, NEUTRAL_FITNESS};
use std::path::Path;

/// Routes individuals to the evaluator for their object type.
///
/// Dispatch is total: an `Unmapped` type evaluates to `NEUTRAL_FITNESS` and
/// its build, pre-cache and cache steps do nothing.
pub struct FitnessDispatcher {
    simple: Box<dyn FitnessEvaluator>,
    assembler: Box<dyn FitnessEvaluator>,
    raw_string: Box<dyn FitnessEvaluator>,
    llvm_pass: Box<dyn FitnessEvaluator>,
    binary_up_to_512: Box<dyn FitnessEvaluator>,
}

impl FitnessDispatcher {
    pub fn new(llvm_pass: LlvmPassEvaluator, seed: Option<u64>) -> Self {
        Self {
            simple: Box::new(PlaceholderEvaluator::new(ObjectType::Simple, seed)),
            assembler: Box::new(PlaceholderEvaluator::new(ObjectType::Assembler, seed)),
            raw_string: Box::new(PlaceholderEvaluator::new(ObjectType::RawString, seed)),
            llvm_pass: Box::new(llvm_pass),
            binary_up_to_512: Box::new(PlaceholderEvaluator::new(ObjectType::BinaryUpTo512, seed)),
        }
    }

    /// Replace the evaluator registered for `evaluator.object_type()`.
    ///
    /// Evaluators for unmapped types are dropped; those types always dispatch
    /// to the neutral fitness.
    pub fn with_evaluator(mut self, evaluator: Box<dyn FitnessEvaluator>) -> Self {
        match evaluator.object_type() {
            ObjectType::Simple => self.simple = evaluator,
            ObjectType::Assembler => self.assembler = evaluator,
            ObjectType::RawString => self.raw_string = evaluator,
            ObjectType::LlvmPass => self.llvm_pass = evaluator,
            ObjectType::BinaryUpTo512 => self.binary_up_to_512 = evaluator,
            ObjectType::Unmapped(tag) => {
                log::warn!("Ignoring evaluator for unmapped object type {}", tag);
            }
        }
        self
    }

    pub fn evaluator_for(&self, object_type: ObjectType) -> Option<&dyn FitnessEvaluator> {
        match object_type {
            ObjectType::Simple => Some(self.simple.as_ref()),
            ObjectType::Assembler => Some(self.assembler.as_ref()),
            ObjectType::RawString => Some(self.raw_string.as_ref()),
            ObjectType::LlvmPass => Some(self.llvm_pass.as_ref()),
            ObjectType::BinaryUpTo512 => Some(self.binary_up_to_512.as_ref()),
            ObjectType::Unmapped(_) => None,
        }
    }

    pub fn build(&self, object_type: ObjectType, synthesizer: &CommandSynthesizer) -> Result<()> {
        match self.evaluator_for(object_type) {
            Some(evaluator) => evaluator.build(synthesizer),
            None => Ok(()),
        }
    }

    pub fn pre_cache(&self, object_type: ObjectType, ctx: &PreCacheContext<'_>) -> Result<()> {
        match self.evaluator_for(object_type) {
            Some(evaluator) => evaluator.pre_cache(ctx),
            None => Ok(()),
        }
    }

    pub fn evaluate(&self, individual: &Individual, ctx: &EvaluationContext<'_>) -> Result<f64> {
        match self.evaluator_for(individual.object_type()) {
            Some(evaluator) => evaluator.evaluate(individual, ctx),
            None => Ok(NEUTRAL_FITNESS),
        }
    }

    pub fn cache(&self, fitness: f64, individual: &Individual, cache_file: &Path) -> Result<()> {
        match self.evaluator_for(individual.object_type()) {
            Some(evaluator) => evaluator.cache(fitness, individual, cache_file),
            None => Ok(()),
        }
    }
}
