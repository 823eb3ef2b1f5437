pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{PassfitError, Result};
pub use types::{Individual, ObjectType, OperationNode, NEUTRAL_FITNESS, WORST_FITNESS};
