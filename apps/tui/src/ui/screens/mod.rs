pub mod dashboard;
pub mod help;
pub mod history;
pub mod prediction;
