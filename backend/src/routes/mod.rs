pub mod charts;
pub mod dashboard;
pub mod insights;
