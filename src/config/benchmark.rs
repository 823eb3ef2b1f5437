use super::traits::ConfigSection;
use crate::error::PassfitError;
use crate::types::DEFAULT_REPETITIONS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Timed executions averaged per measurement
    pub repetitions: u32,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
        }
    }
}

impl ConfigSection for BenchmarkConfig {
    fn section_name() -> &'static str {
        "benchmark"
    }

    fn validate(&self) -> Result<(), PassfitError> {
        if self.repetitions == 0 {
            return Err(PassfitError::Configuration(format!(
                "{}.repetitions must be at least 1",
                Self::section_name()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_repetitions_names_the_field() {
        let config = BenchmarkConfig { repetitions: 0 };
        let err = config.validate().unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Configuration error: benchmark.repetitions must be at least 1"
        );
    }
}
