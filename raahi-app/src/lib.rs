pub mod app_config;
pub mod controller;
pub mod error;
pub mod state;
pub mod views;

pub use controller::{BookingFlow, Screen};
pub use error::FlowError;
pub use state::AppState;
