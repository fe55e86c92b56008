// Domain layer - Pure models and algorithms, no I/O
pub mod axis;
pub mod chart;
pub mod details;
pub mod metric;
pub mod period;
pub mod readings;
pub mod visibility;
