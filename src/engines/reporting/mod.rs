pub mod leaderboard;
pub mod report;

pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use report::{format_fitness, BaselineKind, ResultReporter};
