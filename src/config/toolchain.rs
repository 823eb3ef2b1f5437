use super::traits::ConfigSection;
use crate::error::PassfitError;
use serde::{Deserialize, Serialize};

/// Locations and binaries of the external LLVM toolchain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub root_dir: String,
    pub junk_dir: String,
    pub c_compiler: String,
    pub cxx_compiler: String,
    pub linker: String,
    pub assembler: String,
    pub optimizer: String,
    pub interpreter: String,
    pub ir_extension: String,
    pub bitcode_extension: String,
    /// Flags passed to the optimizer for the "basic optimization" baseline
    pub basic_opt_flags: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            root_dir: "src/files/llvm/".to_string(),
            junk_dir: "junk_output/".to_string(),
            c_compiler: "clang".to_string(),
            cxx_compiler: "clang++".to_string(),
            linker: "llvm-link".to_string(),
            assembler: "llvm-as".to_string(),
            optimizer: "opt".to_string(),
            interpreter: "lli".to_string(),
            ir_extension: "ll".to_string(),
            bitcode_extension: "bc".to_string(),
            basic_opt_flags: vec!["-O1".to_string()],
        }
    }
}

impl ToolchainConfig {
    /// Root directory, always ending in a separator
    pub fn root(&self) -> String {
        with_trailing_slash(&self.root_dir)
    }

    /// Junk output directory under the root, always ending in a separator
    pub fn junk(&self) -> String {
        format!("{}{}", self.root(), with_trailing_slash(&self.junk_dir))
    }
}

fn with_trailing_slash(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}

impl ConfigSection for ToolchainConfig {
    fn section_name() -> &'static str {
        "toolchain"
    }

    fn validate(&self) -> Result<(), PassfitError> {
        let binaries = [
            ("c_compiler", &self.c_compiler),
            ("cxx_compiler", &self.cxx_compiler),
            ("linker", &self.linker),
            ("assembler", &self.assembler),
            ("optimizer", &self.optimizer),
            ("interpreter", &self.interpreter),
        ];
        for (field, value) in binaries {
            if value.trim().is_empty() {
                return Err(PassfitError::Configuration(format!(
                    "{}.{} must not be empty",
                    Self::section_name(),
                    field
                )));
            }
        }
        if self.ir_extension.is_empty() || self.bitcode_extension.is_empty() {
            return Err(PassfitError::Configuration(format!(
                "{}: IR and bitcode extensions must not be empty",
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
    fn test_root_is_normalised() {
        let config = ToolchainConfig {
            root_dir: "work/llvm".to_string(),
            junk_dir: "junk".to_string(),
            ..Default::default()
        };
        assert_eq!(config.root(), "work/llvm/");
        assert_eq!(config.junk(), "work/llvm/junk/");
    }

    #[test]
    fn test_empty_binary_is_rejected() {
        let config = ToolchainConfig {
            optimizer: " ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("toolchain.optimizer must not be empty"));
    }
}
