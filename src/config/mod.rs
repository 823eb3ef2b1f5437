pub mod traits;
pub mod toolchain;
pub mod benchmark;
pub mod run;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use toolchain::ToolchainConfig;
pub use benchmark::BenchmarkConfig;
pub use run::RunConfig;
pub use traits::ConfigSection;
