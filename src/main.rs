use clap::Parser;
use passfit::config::ConfigManager;
use passfit::engines::benchmark::WallClock;
use passfit::engines::reporting::format_fitness;
use passfit::engines::toolchain::SystemRunner;
use passfit::engines::EvaluationSession;
use passfit::{Individual, ObjectType};
use std::path::PathBuf;
use std::sync::Arc;

/// Evaluate LLVM pass orderings by benchmarking the optimised target
#[derive(Parser)]
#[command(name = "passfit")]
#[command(about = "Fitness evaluation for LLVM pass orderings", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target program, relative to the toolchain root
    #[arg(long)]
    target: Option<String>,

    /// Additional source linked into the target (repeatable)
    #[arg(long = "source")]
    sources: Vec<String>,

    /// Folder that receives reports and the summary
    #[arg(long)]
    run_folder: Option<PathBuf>,

    /// Do not write reports or measure baselines
    #[arg(long)]
    no_cache: bool,

    /// Measure the unoptimised and basic-optimisation baselines
    #[arg(long)]
    pre_cache: bool,

    /// Comma-separated pass ordering to evaluate (repeatable, one individual each)
    #[arg(long, value_name = "a,b,c")]
    passes: Vec<String>,

    /// Write summary.json into the run folder
    #[arg(long)]
    summary: bool,
}

fn split_passes(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let manager = ConfigManager::new();
    if let Some(path) = &cli.config {
        manager.load_from_file(path)?;
    }
    manager.update(|c| {
        if let Some(target) = &cli.target {
            c.run.target_file = target.clone();
        }
        if !cli.sources.is_empty() {
            c.run.source_files = cli.sources.clone();
        }
        if let Some(folder) = &cli.run_folder {
            c.run.run_folder = folder.clone();
        }
        if cli.no_cache {
            c.run.cache = false;
        }
    })?;

    let session = EvaluationSession::open_or_abort(
        manager.get(),
        Arc::new(SystemRunner),
        Arc::new(WallClock::new()),
    )?;

    if cli.pre_cache || !cli.passes.is_empty() {
        session.build()?;
    }

    if cli.pre_cache {
        if let Err(e) = session.pre_cache() {
            log::error!("Baseline measurement failed: {}", e);
        }
    }

    if !cli.passes.is_empty() {
        let population: Vec<Individual> = cli
            .passes
            .iter()
            .map(|list| Individual::new(ObjectType::LlvmPass, split_passes(list)))
            .collect();

        for (individual, record) in population.iter().zip(session.evaluate_population(&population)?) {
            let passes: Vec<&str> = individual.names().collect();
            println!("{}\t{}", passes.join(","), format_fitness(record.fitness));
        }
    }

    if cli.summary {
        let path = session.write_summary()?;
        log::info!("Summary written to {}", path.display());
    }

    Ok(())
}
