#![allow(dead_code)]

use passfit::config::{AppConfig, ToolchainConfig};
use passfit::engines::benchmark::Clock;
use passfit::engines::toolchain::{CommandLine, ProcessRunner};
use passfit::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Returns queued statuses per program (0 once the queue is empty) and logs every command
#[derive(Default)]
pub struct ScriptedRunner {
    pub statuses: Mutex<HashMap<String, Vec<i32>>>,
    pub log: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn with_statuses(program: &str, statuses: &[i32]) -> Self {
        let runner = Self::default();
        runner
            .statuses
            .lock()
            .unwrap()
            .insert(program.to_string(), statuses.to_vec());
        runner
    }

    pub fn invocations(&self, program: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(program))
            .count()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, command: &CommandLine) -> Result<i32> {
        self.log.lock().unwrap().push(command.to_string());
        let mut statuses = self.statuses.lock().unwrap();
        let status = match statuses.get_mut(&command.program) {
            Some(queue) if !queue.is_empty() => queue.remove(0),
            _ => 0,
        };
        Ok(status)
    }
}

/// Each start/stop pair of readings is `durations[i]` apart
pub struct ScriptedClock {
    durations: Vec<f64>,
    state: Mutex<(usize, f64)>,
}

impl ScriptedClock {
    pub fn new(durations: &[f64]) -> Self {
        Self {
            durations: durations.to_vec(),
            state: Mutex::new((0, 0.0)),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> f64 {
        let mut state = self.state.lock().unwrap();
        let (calls, now) = *state;
        let next = if calls % 2 == 1 {
            now + self.durations[(calls / 2) % self.durations.len()]
        } else {
            now
        };
        *state = (calls + 1, next);
        next
    }
}

pub fn toolchain(dir: &tempfile::TempDir) -> ToolchainConfig {
    ToolchainConfig {
        root_dir: format!("{}/llvm/", dir.path().display()),
        ..Default::default()
    }
}

/// Config for `loop.c` with everything rooted in `dir`
pub fn loop_config(dir: &tempfile::TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.toolchain = toolchain(dir);
    config.run.target_file = "loop.c".to_string();
    config.run.run_folder = dir.path().join("run");
    config.run.seed = Some(1);
    config
}

pub const SCENARIO_TIMES: [f64; 5] = [0.10, 0.11, 0.09, 0.10, 0.10];
