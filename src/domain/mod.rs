// Domain layer - Pure data model, no I/O
pub mod chart;
pub mod dashboard;
pub mod refresh;
pub mod table;
pub mod visualization;
