pub mod config;
pub mod error;
pub mod evaluate;
pub mod plan;
pub mod rank;
pub mod runner;
pub mod schedule;
pub mod simulate;
pub mod types;

pub use config::Configuration;
pub use error::ForecastError;
pub use plan::Strategy;
pub use rank::RankingPolicy;
pub use runner::CancelToken;
pub use simulate::{simulate, simulate_with, SimulationInput, SimulationOutput};
pub use types::*;

/// Standard result type for all revcast operations
pub type ForecastResult<T> = Result<T, ForecastError>;
