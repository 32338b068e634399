// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_prediction_service;
pub mod system_clock;
pub mod terminal_view;
