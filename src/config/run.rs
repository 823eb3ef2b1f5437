use super::traits::ConfigSection;
use crate::error::PassfitError;
use crate::types::ObjectType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-run settings supplied by the evolutionary driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub run_folder: PathBuf,
    /// Target program, relative to the toolchain root (e.g. `loop.c`)
    pub target_file: String,
    /// Additional sources linked into the target
    pub source_files: Vec<String>,
    pub object_type: ObjectType,
    pub cache: bool,
    pub parallel: bool,
    /// Memoised fitness entries kept per run; 0 disables memoisation
    pub memo_capacity: usize,
    pub leaderboard_size: usize,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            run_folder: PathBuf::from("runs/latest"),
            target_file: "test.c".to_string(),
            source_files: Vec::new(),
            object_type: ObjectType::LlvmPass,
            cache: true,
            parallel: false,
            memo_capacity: 1000,
            leaderboard_size: 10,
            seed: None,
        }
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    // The target's extension is checked when commands are synthesized.
    fn validate(&self) -> Result<(), PassfitError> {
        if self.target_file.trim().is_empty() {
            return Err(PassfitError::Configuration(format!(
                "{}.target_file must be set",
                Self::section_name()
            )));
        }
        if self.leaderboard_size == 0 {
            return Err(PassfitError::Configuration(format!(
                "{}.leaderboard_size must be at least 1",
                Self::section_name()
            )));
        }
        Ok(())
    }
}
