//! State module for tracking crawl task progress
//!
//! # Components
//!
//! - `TaskOutcome`: The terminal state each crawl task ends in

mod task_outcome;

pub use task_outcome::TaskOutcome;
