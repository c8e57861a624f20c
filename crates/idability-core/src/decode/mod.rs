pub mod matcher;
pub mod outcome;

pub use matcher::{evaluate, match_code};
pub use outcome::{categorize, Category, Confusion, Evaluation, SubjectHits};
