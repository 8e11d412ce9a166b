pub mod cardinality;
pub mod simulate;
