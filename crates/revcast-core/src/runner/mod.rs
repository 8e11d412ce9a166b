pub mod batch;

pub use batch::{run, CancelToken, RunOutcome};
