use super::evaluator::{EvaluationContext, FitnessEvaluator};
use crate::error::Result;
use crate::types::{Individual, ObjectType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Stand-in evaluator for object types without a real fitness protocol.
///
/// Returns a whole number drawn uniformly from [0, 100). Pre-cache and cache are no-ops.
pub struct PlaceholderEvaluator {
    object_type: ObjectType,
    rng: Mutex<StdRng>,
}

impl PlaceholderEvaluator {
    pub fn new(object_type: ObjectType, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(object_type.tag() as u64)),
            None => StdRng::from_entropy(),
        };

        Self {
            object_type,
            rng: Mutex::new(rng),
        }
    }
}

impl FitnessEvaluator for PlaceholderEvaluator {
    fn object_type(&self) -> ObjectType {
        self.object_type
    }

    fn evaluate(&self, _individual: &Individual, _ctx: &EvaluationContext<'_>) -> Result<f64> {
        let mut rng = match self.rng.lock() {
            Ok(rng) => rng,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(rng.gen_range(0..100u32) as f64)
    }
}
