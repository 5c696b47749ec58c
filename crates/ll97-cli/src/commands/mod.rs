pub mod calculate;
pub mod common;
pub mod completions;
pub mod factors;
pub mod report;
pub mod validate;
