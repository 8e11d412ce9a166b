pub mod commission;

pub use commission::{recognition_timeline, AMORTIZATION_MONTHS, RECOGNITION_LAG_MONTHS};
