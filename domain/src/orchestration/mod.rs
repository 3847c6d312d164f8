//! Review orchestration domain: stages, pipeline state and results.

pub mod aggregator;
pub mod entities;
pub mod value_objects;
