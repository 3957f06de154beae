pub mod config;
pub mod error;
pub mod types;

pub use config::TalentoConfig;
pub use error::{Result, TalentoError};
pub use types::*;
