pub mod clock;
pub mod timed;

pub use clock::{Clock, WallClock};
pub use timed::{BenchmarkOutcome, TimedBenchmark};
