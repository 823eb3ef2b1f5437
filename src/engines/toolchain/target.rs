use crate::error::{PassfitError, Result};

/// A source file name split at its first extension separator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    name: String,
    stem: String,
    extension: String,
}

impl TargetFile {
    pub fn parse(name: &str) -> Result<Self> {
        let (stem, extension) = name
            .split_once('.')
            .ok_or_else(|| PassfitError::InvalidTargetFile(name.to_string()))?;

        if stem.is_empty() || extension.is_empty() {
            return Err(PassfitError::InvalidTargetFile(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            stem: stem.to_string(),
            extension: extension.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_cxx(&self) -> bool {
        matches!(self.extension.as_str(), "cpp" | "cc" | "cxx" | "C")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_at_first_separator() {
        let target = TargetFile::parse("loop.test.c").unwrap();
        assert_eq!(target.stem(), "loop");
        assert_eq!(target.extension(), "test.c");
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        for name in ["loop", ".c", "loop."] {
            assert!(
                matches!(TargetFile::parse(name), Err(PassfitError::InvalidTargetFile(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_cxx_detection() {
        assert!(TargetFile::parse("matrix.cpp").unwrap().is_cxx());
        assert!(!TargetFile::parse("loop.c").unwrap().is_cxx());
    }
}
