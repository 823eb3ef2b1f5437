use super::command::{CommandChain, CommandLine};
use super::target::TargetFile;
use crate::config::ToolchainConfig;
use crate::error::{PassfitError, Result};
use crate::types::Individual;
use std::collections::HashMap;

/// Paths and commands used to evaluate one pass-sequence individual
#[derive(Debug, Clone)]
pub struct EvaluationCommands {
    pub output: String,
    pub apply: CommandLine,
    pub run: CommandLine,
}

/// Turns a target program and an operation sequence into toolchain invocations.
///
/// All paths are plain strings under `toolchain.root_dir`; nothing here touches
/// the filesystem. Missing inputs surface through the exit status of the
/// commands themselves.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    toolchain: ToolchainConfig,
    target: TargetFile,
    sources: Vec<TargetFile>,
}

impl CommandSynthesizer {
    /// Fails with `InvalidTargetFile` if the target or any source lacks an extension,
    /// and with `Configuration` if two files share a stem (both would compile to
    /// `<root><stem>.<ir>`).
    pub fn new(toolchain: ToolchainConfig, target_file: &str, source_files: &[String]) -> Result<Self> {
        let target = TargetFile::parse(target_file)?;
        let sources = source_files
            .iter()
            .map(|s| TargetFile::parse(s))
            .collect::<Result<Vec<_>>>()?;

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for file in std::iter::once(&target).chain(sources.iter()) {
            if let Some(previous) = seen.insert(file.stem(), file.name()) {
                return Err(PassfitError::Configuration(format!(
                    "{} and {} both compile to {}.{}",
                    previous,
                    file.name(),
                    file.stem(),
                    toolchain.ir_extension
                )));
            }
        }

        Ok(Self {
            toolchain,
            target,
            sources,
        })
    }

    pub fn target(&self) -> &TargetFile {
        &self.target
    }

    /// `<root><stem>_linked.<ir>`
    pub fn linked_ir(&self) -> String {
        self.artifact("_linked", &self.toolchain.ir_extension)
    }

    /// `<root><stem>_linked.<bc>`
    pub fn linked_bitcode(&self) -> String {
        self.artifact("_linked", &self.toolchain.bitcode_extension)
    }

    pub fn basic_opt_ir(&self) -> String {
        self.artifact("_linked_opt", &self.toolchain.ir_extension)
    }

    pub fn basic_opt_bitcode(&self) -> String {
        self.artifact("_linked_opt", &self.toolchain.bitcode_extension)
    }

    /// `<root>junk_output/[<slot>/]<stem>_linked_temp.<ir>`
    ///
    /// Concurrent evaluations against the same target must each pass a distinct slot.
    pub fn temp_output(&self, slot: Option<&str>) -> String {
        let mut path = self.toolchain.junk();
        if let Some(slot) = slot {
            path.push_str(slot);
            path.push('/');
        }
        path.push_str(self.target.stem());
        path.push_str("_linked_temp.");
        path.push_str(&self.toolchain.ir_extension);
        path
    }

    /// Compile the target and every source to IR, then link them into `linked_ir()`.
    pub fn build_command(&self) -> CommandChain {
        let root = self.toolchain.root();
        let mut steps = Vec::with_capacity(self.sources.len() + 2);
        let mut modules = Vec::with_capacity(self.sources.len() + 1);

        for file in std::iter::once(&self.target).chain(self.sources.iter()) {
            let compiler = if file.is_cxx() {
                &self.toolchain.cxx_compiler
            } else {
                &self.toolchain.c_compiler
            };
            let module = format!("{}{}.{}", root, file.stem(), self.toolchain.ir_extension);
            steps.push(
                CommandLine::new(compiler.as_str())
                    .args(["-S", "-emit-llvm"])
                    .arg(format!("{}{}", root, file.name()))
                    .arg("-o")
                    .arg(module.as_str()),
            );
            modules.push(module);
        }

        steps.push(
            CommandLine::new(self.toolchain.linker.as_str())
                .args(modules)
                .args(["-S", "-o"])
                .arg(self.linked_ir()),
        );

        CommandChain::new(steps)
    }

    /// `opt -<pass>... <input> -S -o <output>`, passes in sequence order
    pub fn apply_command(&self, individual: &Individual, input: &str, output: &str) -> CommandLine {
        CommandLine::new(self.toolchain.optimizer.as_str())
            .args(individual.names().map(pass_flag))
            .arg(input)
            .args(["-S", "-o"])
            .arg(output)
    }

    /// The basic-optimization baseline: `opt <basic flags> <linked> -S -o <linked_opt>`
    pub fn basic_opt_command(&self) -> CommandLine {
        CommandLine::new(self.toolchain.optimizer.as_str())
            .args(self.toolchain.basic_opt_flags.iter().cloned())
            .arg(self.linked_ir())
            .args(["-S", "-o"])
            .arg(self.basic_opt_ir())
    }

    pub fn assemble_command(&self, ir: &str, bitcode: &str) -> CommandLine {
        CommandLine::new(self.toolchain.assembler.as_str())
            .arg(ir)
            .arg("-o")
            .arg(bitcode)
    }

    pub fn run_command(&self, artifact: &str) -> CommandLine {
        CommandLine::new(self.toolchain.interpreter.as_str()).arg(artifact)
    }

    /// Apply and run commands for one individual, writing into its slot
    pub fn evaluation_commands(&self, individual: &Individual, slot: Option<&str>) -> EvaluationCommands {
        let output = self.temp_output(slot);
        EvaluationCommands {
            apply: self.apply_command(individual, &self.linked_ir(), &output),
            run: self.run_command(&output),
            output,
        }
    }

    fn artifact(&self, suffix: &str, extension: &str) -> String {
        format!(
            "{}{}{}.{}",
            self.toolchain.root(),
            self.target.stem(),
            suffix,
            extension
        )
    }
}

fn pass_flag(name: &str) -> String {
    if name.starts_with('-') {
        name.to_string()
    } else {
        format!("-{}", name)
    }
}
