// Domain layer - Plain data for the load prediction page
pub mod chart;
pub mod error;
pub mod prediction;
