pub mod chart;
pub mod cutoff;
pub mod day;
pub mod interval;
pub mod price;
pub mod region;
pub mod snapshot;
pub mod statistics;
