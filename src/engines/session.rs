use crate::config::AppConfig;
use crate::engines::benchmark::Clock;
use crate::engines::fitness::{
    EvaluationContext, FitnessDispatcher, FitnessMemo, LlvmPassEvaluator, PreCacheContext,
};
use crate::engines::reporting::{format_fitness, Leaderboard, LeaderboardEntry};
use crate::engines::toolchain::{CommandSynthesizer, ProcessRunner};
use crate::error::{PassfitError, Result};
use crate::types::{Individual, ObjectType};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Result of evaluating one individual
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub fitness: f64,
    pub memoized: bool,
    pub cache_file: Option<PathBuf>,
    /// Set when the report could not be written; the fitness is still valid
    pub report_error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub target_file: String,
    pub object_type: ObjectType,
    pub repetitions: u32,
    pub evaluations: usize,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// One evolutionary run's view of the fitness engine.
///
/// Owns the command synthesizer for the run's target, the dispatcher and the
/// per-run memo and leaderboard. Safe to share across threads.
pub struct EvaluationSession {
    config: AppConfig,
    synthesizer: CommandSynthesizer,
    dispatcher: FitnessDispatcher,
    memo: FitnessMemo,
    leaderboard: Mutex<Leaderboard>,
    evaluations: AtomicUsize,
}

impl EvaluationSession {
    /// Fails if the configuration is invalid or the target has no extension.
    pub fn open(
        config: AppConfig,
        runner: Arc<dyn ProcessRunner>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let synthesizer = CommandSynthesizer::new(
            config.toolchain.clone(),
            &config.run.target_file,
            &config.run.source_files,
        )?;
        let llvm_pass = LlvmPassEvaluator::new(runner, clock, config.benchmark.repetitions);
        let dispatcher = FitnessDispatcher::new(llvm_pass, config.run.seed);

        Ok(Self {
            memo: FitnessMemo::new(config.run.memo_capacity),
            leaderboard: Mutex::new(Leaderboard::new(config.run.leaderboard_size)),
            evaluations: AtomicUsize::new(0),
            config,
            synthesizer,
            dispatcher,
        })
    }

    /// Like `open`, but a fatal (configuration) error terminates the process.
    /// Other errors are returned.
    pub fn open_or_abort(
        config: AppConfig,
        runner: Arc<dyn ProcessRunner>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Self::open(config, runner, clock).map_err(|e| {
            if e.is_fatal() {
                error!("{}", e);
                error!("Aborting run");
                std::process::exit(1);
            }
            e
        })
    }

    pub fn with_dispatcher(mut self, dispatcher: FitnessDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn synthesizer(&self) -> &CommandSynthesizer {
        &self.synthesizer
    }

    pub fn run_folder(&self) -> &Path {
        &self.config.run.run_folder
    }

    /// Build the artifacts individuals are evaluated against (the linked IR for
    /// pass orderings). Required before `evaluate`, whether or not caching is on.
    pub fn build(&self) -> Result<()> {
        self.dispatcher
            .build(self.config.run.object_type, &self.synthesizer)
    }

    /// Measure the baseline reports for the run's object type. A no-op when caching is off.
    ///
    /// Call after `build`.
    pub fn pre_cache(&self) -> Result<()> {
        if !self.config.run.cache {
            debug!("Caching disabled; skipping baseline measurement");
            return Ok(());
        }
        self.ensure_run_folder();

        let ctx = PreCacheContext {
            run_folder: self.run_folder(),
            synthesizer: &self.synthesizer,
            cache: self.config.run.cache,
        };
        self.dispatcher.pre_cache(self.config.run.object_type, &ctx)
    }

    /// Evaluate one individual using the unslotted temporary paths.
    ///
    /// Not safe to call concurrently for the same target; use
    /// `evaluate_population` with `run.parallel` for that.
    pub fn evaluate(&self, individual: &Individual, cache_file: Option<&Path>) -> Result<EvaluationRecord> {
        self.evaluate_in_slot(individual, None, cache_file)
    }

    /// Evaluate every individual, writing `individual_<n>.txt` reports when caching is on.
    pub fn evaluate_population(&self, individuals: &[Individual]) -> Result<Vec<EvaluationRecord>> {
        if self.config.run.cache {
            self.ensure_run_folder();
        }

        let evaluate_one = |(i, individual): (usize, &Individual)| {
            let cache_file = self
                .run_folder()
                .join(format!("individual_{}.txt", i + 1));
            let slot = format!("eval-{}", i + 1);
            let slot = self.config.run.parallel.then_some(slot.as_str());
            self.evaluate_in_slot(individual, slot, Some(&cache_file))
        };

        if self.config.run.parallel {
            individuals.par_iter().enumerate().map(evaluate_one).collect()
        } else {
            individuals.iter().enumerate().map(evaluate_one).collect()
        }
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        match self.leaderboard.lock() {
            Ok(board) => board.get_all().to_vec(),
            Err(poisoned) => poisoned.into_inner().get_all().to_vec(),
        }
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            generated_at: chrono::Utc::now().to_rfc3339(),
            target_file: self.config.run.target_file.clone(),
            object_type: self.config.run.object_type,
            repetitions: self.config.benchmark.repetitions,
            evaluations: self.evaluations(),
            leaderboard: self.leaderboard(),
        }
    }

    /// Write `summary.json` into the run folder and return its path.
    pub fn write_summary(&self) -> Result<PathBuf> {
        self.ensure_run_folder();
        let path = self.run_folder().join("summary.json");
        let json = serde_json::to_string_pretty(&self.summary())?;
        std::fs::write(&path, json).map_err(|source| PassfitError::Report {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn evaluate_in_slot(
        &self,
        individual: &Individual,
        slot: Option<&str>,
        cache_file: Option<&Path>,
    ) -> Result<EvaluationRecord> {
        let key = individual.canonical_key();

        let (fitness, memoized) = match self.memo.get(&key) {
            Some(fitness) => (fitness, true),
            None => {
                let ctx = EvaluationContext {
                    synthesizer: &self.synthesizer,
                    slot,
                };
                let fitness = self.dispatcher.evaluate(individual, &ctx)?;
                self.memo.set(key, fitness);
                (fitness, false)
            }
        };
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        let mut report_error = None;
        let cache_file = cache_file.filter(|_| self.config.run.cache);
        if let Some(path) = cache_file {
            if let Err(e) = self.dispatcher.cache(fitness, individual, path) {
                error!("{}", e);
                report_error = Some(e.to_string());
            }
        }

        if let Ok(mut board) = self.leaderboard.lock() {
            board.try_add(individual, fitness);
        }

        info!(
            "Evaluated {} operation(s): fitness {}{}",
            individual.len(),
            format_fitness(fitness),
            if memoized { " (memoized)" } else { "" }
        );

        Ok(EvaluationRecord {
            fitness,
            memoized,
            cache_file: cache_file.map(Path::to_path_buf),
            report_error,
        })
    }

    fn ensure_run_folder(&self) {
        if let Err(e) = std::fs::create_dir_all(self.run_folder()) {
            warn!("Could not create run folder {}: {}", self.run_folder().display(), e);
        }
    }
}
