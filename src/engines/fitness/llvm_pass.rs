use super::evaluator::{EvaluationContext, FitnessEvaluator, PreCacheContext};
use crate::engines::benchmark::{BenchmarkOutcome, Clock, TimedBenchmark};
use crate::engines::reporting::{BaselineKind, ResultReporter};
use crate::engines::toolchain::{CommandChain, CommandLine, CommandSynthesizer, ProcessRunner};
use crate::error::{PassfitError, Result};
use crate::types::{Individual, ObjectType, WORST_FITNESS};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

/// Fitness of a pass ordering: mean `lli` runtime of the target after `opt`
/// applies the passes, in seconds. Lower is better.
pub struct LlvmPassEvaluator {
    runner: Arc<dyn ProcessRunner>,
    clock: Arc<dyn Clock>,
    repetitions: u32,
}

impl LlvmPassEvaluator {
    pub fn new(runner: Arc<dyn ProcessRunner>, clock: Arc<dyn Clock>, repetitions: u32) -> Self {
        Self {
            runner,
            clock,
            repetitions,
        }
    }

    fn benchmark(&self, command: &CommandLine) -> BenchmarkOutcome {
        TimedBenchmark::new(self.runner.as_ref(), self.clock.as_ref(), self.repetitions)
            .measure(command)
    }

    /// Run a setup step whose failure leaves nothing to measure.
    fn run_required(&self, command: &CommandLine) -> Result<()> {
        match self.runner.run(command)? {
            0 => Ok(()),
            status => Err(PassfitError::CommandFailed {
                command: command.to_string(),
                status,
            }),
        }
    }

    fn run_required_chain(&self, chain: &CommandChain) -> Result<()> {
        match self.runner.run_chain(chain)? {
            0 => Ok(()),
            status => Err(PassfitError::CommandFailed {
                command: chain.to_string(),
                status,
            }),
        }
    }

    fn measure_baseline(&self, run_folder: &Path, kind: BaselineKind, command: &CommandLine) -> Result<()> {
        let outcome = self.benchmark(command);
        if !outcome.succeeded() {
            warn!(
                "{} of {} baseline runs of '{}' failed",
                outcome.failed_runs, outcome.repetitions, command
            );
        }

        let path = ResultReporter::write_baseline(run_folder, kind, outcome.mean_secs)?;
        info!(
            "Baseline {:?}: {:.6}s over {} runs ({})",
            kind,
            outcome.mean_secs,
            outcome.repetitions,
            path.display()
        );
        Ok(())
    }
}

impl FitnessEvaluator for LlvmPassEvaluator {
    fn object_type(&self) -> ObjectType {
        ObjectType::LlvmPass
    }

    fn build(&self, synthesizer: &CommandSynthesizer) -> Result<()> {
        let build = synthesizer.build_command();
        debug!("build command: {}", build);
        self.run_required_chain(&build)
    }

    /// Expects `build` to have produced the linked IR.
    fn pre_cache(&self, ctx: &PreCacheContext<'_>) -> Result<()> {
        if !ctx.cache {
            return Ok(());
        }

        let synthesizer = ctx.synthesizer;
        info!("Running the target with no optimization");
        self.run_required(&synthesizer.assemble_command(
            &synthesizer.linked_ir(),
            &synthesizer.linked_bitcode(),
        ))?;
        self.measure_baseline(
            ctx.run_folder,
            BaselineKind::NoOptimization,
            &synthesizer.run_command(&synthesizer.linked_bitcode()),
        )?;

        info!("Running the target with basic optimization");
        self.run_required(&synthesizer.basic_opt_command())?;
        self.run_required(&synthesizer.assemble_command(
            &synthesizer.basic_opt_ir(),
            &synthesizer.basic_opt_bitcode(),
        ))?;
        self.measure_baseline(
            ctx.run_folder,
            BaselineKind::BasicOptimization,
            &synthesizer.run_command(&synthesizer.basic_opt_bitcode()),
        )
    }

    fn evaluate(&self, individual: &Individual, ctx: &EvaluationContext<'_>) -> Result<f64> {
        let commands = ctx.synthesizer.evaluation_commands(individual, ctx.slot);
        debug!("opt command: {}", commands.apply);
        debug!("run command: {}", commands.run);

        if let Some(parent) = Path::new(&commands.output).parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Could not create {}: {}", parent.display(), e);
            }
        }

        match self.runner.run(&commands.apply) {
            Ok(0) => {}
            Ok(status) => {
                debug!("opt exited with status {}; individual penalised", status);
                return Ok(WORST_FITNESS);
            }
            Err(e) => {
                warn!("opt could not be run: {}", e);
                return Ok(WORST_FITNESS);
            }
        }

        let outcome = self.benchmark(&commands.run);
        debug!(
            "Run command took {:.6} seconds on average over {} runs",
            outcome.mean_secs, outcome.repetitions
        );

        if !outcome.succeeded() {
            debug!(
                "{} of {} runs failed; individual penalised",
                outcome.failed_runs, outcome.repetitions
            );
            return Ok(WORST_FITNESS);
        }

        Ok(outcome.mean_secs)
    }

    fn cache(&self, fitness: f64, individual: &Individual, cache_file: &Path) -> Result<()> {
        ResultReporter::write_individual(cache_file, individual, fitness)
    }
}
