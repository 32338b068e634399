// Application layer - Use cases and the seams they depend on
pub mod chart_session;
#[cfg(test)]
pub mod fakes;
pub mod page_view;
pub mod prediction_flow;
pub mod prediction_service;
