pub mod app_state;
pub mod history;
pub mod orchestrator;
