// HTTP controllers

pub mod config_controller;

pub use config_controller::{create_config_router, ConfigAppState};
