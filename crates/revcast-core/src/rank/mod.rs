pub mod ranker;

pub use ranker::{compare, RankingPolicy, TopK};
