pub mod command;
pub mod runner;
pub mod synthesizer;
pub mod target;

pub use command::{CommandChain, CommandLine};
pub use runner::{ProcessRunner, SystemRunner};
pub use synthesizer::{CommandSynthesizer, EvaluationCommands};
pub use target::TargetFile;
