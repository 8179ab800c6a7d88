pub mod chart;
pub mod cycle;
