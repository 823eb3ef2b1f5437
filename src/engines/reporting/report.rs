use crate::error::{PassfitError, Result};
use crate::types::{Individual, WORST_FITNESS};
use std::path::{Path, PathBuf};

const INDIVIDUAL_PREAMBLE: &str =
    "Description file for Individual\n\nHere are the passes in this individual, in order:\n\n";

const INDIVIDUAL_FITNESS_NOTE: &str = "The fitness of the individual is the time it takes to complete the testing script provided in seconds after the specified optimization passes are applied. Lower fitness is better.";

const BASELINE_FITNESS_NOTE: &str = "The fitness of the individual is the time it takes to complete the testing script provided in seconds. Lower fitness is better.";

/// The two reference measurements taken before any individual is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineKind {
    NoOptimization,
    BasicOptimization,
}

impl BaselineKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            BaselineKind::NoOptimization => "original_no_optimization.txt",
            BaselineKind::BasicOptimization => "original_basic_optimization.txt",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            BaselineKind::NoOptimization => {
                "Description for original file with no optimization applied"
            }
            BaselineKind::BasicOptimization => {
                "Description for original file with only basic optimization applied"
            }
        }
    }
}

/// Renders and writes the human-readable fitness reports.
pub struct ResultReporter;

impl ResultReporter {
    /// Describe every node in order, then the fitness and its units.
    pub fn render_individual(individual: &Individual, fitness: f64) -> String {
        let passes: Vec<String> = individual.iter().map(|node| node.to_string()).collect();

        let mut text = String::from(INDIVIDUAL_PREAMBLE);
        text.push_str(&passes.join("\n"));
        text.push_str("\n\n");
        text.push_str(INDIVIDUAL_FITNESS_NOTE);
        text.push_str(&fitness_line(fitness));
        text
    }

    pub fn render_baseline(kind: BaselineKind, mean_secs: f64) -> String {
        format!(
            "{}\n\n{}{}",
            kind.heading(),
            BASELINE_FITNESS_NOTE,
            fitness_line(mean_secs)
        )
    }

    /// Overwrites `path`. Failures are returned, never swallowed.
    pub fn write_individual(path: &Path, individual: &Individual, fitness: f64) -> Result<()> {
        write_report(path, &Self::render_individual(individual, fitness))
    }

    /// Writes `<run_folder>/<baseline file>` and returns its path.
    pub fn write_baseline(run_folder: &Path, kind: BaselineKind, mean_secs: f64) -> Result<PathBuf> {
        let path = run_folder.join(kind.file_name());
        write_report(&path, &Self::render_baseline(kind, mean_secs))?;
        Ok(path)
    }
}

/// Six decimals for measured runtimes; the failure sentinel in exponent form, marked.
pub fn format_fitness(fitness: f64) -> String {
    if fitness >= WORST_FITNESS {
        format!("{:e} (execution failed)", fitness)
    } else {
        format!("{:.6}", fitness)
    }
}

fn fitness_line(fitness: f64) -> String {
    format!("\n\nFitness of this individual: {} sec", format_fitness(fitness))
}

fn write_report(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| PassfitError::Report {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectType;

    #[test]
    fn test_individual_report_layout() {
        let individual = Individual::new(ObjectType::LlvmPass, ["unroll", "inline"]);
        let text = ResultReporter::render_individual(&individual, 0.1);

        assert!(text.starts_with(INDIVIDUAL_PREAMBLE));
        assert!(text.contains("in order:\n\nunroll\ninline\n\nThe fitness"));
        assert!(text.ends_with("Fitness of this individual: 0.100000 sec"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let individual = Individual::new(ObjectType::LlvmPass, ["gvn", "licm", "dce"]);
        assert_eq!(
            ResultReporter::render_individual(&individual, 1.25),
            ResultReporter::render_individual(&individual, 1.25)
        );
    }

    #[test]
    fn test_baseline_report() {
        let text = ResultReporter::render_baseline(BaselineKind::BasicOptimization, 2.5);
        assert!(text.starts_with("Description for original file with only basic optimization applied\n\n"));
        assert!(text.ends_with("Fitness of this individual: 2.500000 sec"));
    }

    #[test]
    fn test_sentinel_fitness_is_readable() {
        let individual = Individual::new(ObjectType::LlvmPass, ["unroll"]);
        let text = ResultReporter::render_individual(&individual, WORST_FITNESS);

        assert!(text.ends_with(
            "Fitness of this individual: 1.7976931348623157e308 (execution failed) sec"
        ));
        assert!(text.len() < 600);
        assert_eq!(format_fitness(0.1), "0.100000");
    }

    #[test]
    fn test_unwritable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("individual.txt");
        let individual = Individual::new(ObjectType::LlvmPass, ["inline"]);

        let result = ResultReporter::write_individual(&path, &individual, 1.0);
        assert!(matches!(result, Err(PassfitError::Report { .. })));
    }

    #[test]
    fn test_write_truncates_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("individual.txt");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        let individual = Individual::new(ObjectType::LlvmPass, ["inline"]);
        ResultReporter::write_individual(&path, &individual, 1.0).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, ResultReporter::render_individual(&individual, 1.0));
    }
}
