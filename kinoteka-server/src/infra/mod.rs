pub mod app_state;
pub mod cors;
pub mod errors;
pub mod extract;
pub mod telemetry;
