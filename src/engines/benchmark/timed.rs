use super::clock::Clock;
use crate::engines::toolchain::{CommandLine, ProcessRunner};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkOutcome {
    pub mean_secs: f64,
    pub repetitions: u32,
    pub failed_runs: u32,
}

impl BenchmarkOutcome {
    /// True when every repetition exited with status zero
    pub fn succeeded(&self) -> bool {
        self.failed_runs == 0
    }
}

/// Runs a command repeatedly and averages its wall-clock time.
pub struct TimedBenchmark<'a> {
    runner: &'a dyn ProcessRunner,
    clock: &'a dyn Clock,
    repetitions: u32,
}

impl<'a> TimedBenchmark<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, clock: &'a dyn Clock, repetitions: u32) -> Self {
        Self {
            runner,
            clock,
            repetitions: repetitions.max(1),
        }
    }

    /// Every repetition runs even after a failure; the caller decides what a
    /// failed run means for fitness.
    pub fn measure(&self, command: &CommandLine) -> BenchmarkOutcome {
        let mut total = 0.0;
        let mut failed_runs = 0;

        for run in 0..self.repetitions {
            let start = self.clock.now();
            let status = self.runner.run(command);
            let elapsed = (self.clock.now() - start).max(0.0);
            total += elapsed;

            match status {
                Ok(0) => log::trace!("run {} of '{}' took {:.6}s", run + 1, command, elapsed),
                Ok(code) => {
                    failed_runs += 1;
                    log::debug!("run {} of '{}' exited with status {}", run + 1, command, code);
                }
                Err(e) => {
                    failed_runs += 1;
                    log::warn!("run {} of '{}' failed: {}", run + 1, command, e);
                }
            }
        }

        BenchmarkOutcome {
            mean_secs: total / self.repetitions as f64,
            repetitions: self.repetitions,
            failed_runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::sync::Mutex;

    /// Advances by a fixed step every time it is read
    struct SteppingClock {
        ticks: Mutex<u32>,
        step: f64,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> f64 {
            let mut ticks = self.ticks.lock().unwrap();
            *ticks += 1;
            *ticks as f64 * self.step
        }
    }

    struct StatusRunner {
        statuses: Mutex<Vec<i32>>,
    }

    impl ProcessRunner for StatusRunner {
        fn run(&self, _command: &CommandLine) -> Result<i32> {
            Ok(self.statuses.lock().unwrap().remove(0))
        }
    }

    #[test]
    fn test_mean_over_all_repetitions() {
        let clock = SteppingClock { ticks: Mutex::new(0), step: 0.25 };
        let runner = StatusRunner { statuses: Mutex::new(vec![0, 0, 0, 0]) };

        let outcome = TimedBenchmark::new(&runner, &clock, 4).measure(&CommandLine::new("lli"));

        assert!(outcome.succeeded());
        assert_eq!(outcome.repetitions, 4);
        assert!((outcome.mean_secs - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_failure_does_not_stop_the_loop() {
        let clock = SteppingClock { ticks: Mutex::new(0), step: 0.1 };
        let runner = StatusRunner { statuses: Mutex::new(vec![0, 1, 0]) };

        let outcome = TimedBenchmark::new(&runner, &clock, 3).measure(&CommandLine::new("lli"));

        assert!(!outcome.succeeded());
        assert_eq!(outcome.failed_runs, 1);
        assert!(runner.statuses.lock().unwrap().is_empty(), "all repetitions should run");
    }
}
