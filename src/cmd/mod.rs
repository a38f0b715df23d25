pub mod rank;
pub mod report;
