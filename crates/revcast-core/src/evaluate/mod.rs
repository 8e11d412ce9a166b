pub mod scenario;

pub use scenario::evaluate;
