pub mod catalog;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod forum;
pub mod state;
pub mod transition;
pub mod viewpoint;

pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use error::*;
pub use forum::*;
pub use state::*;
pub use transition::*;
pub use viewpoint::*;
