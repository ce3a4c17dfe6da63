pub mod config;
pub mod datasources;
pub mod error;
pub mod knowledge;
pub mod logic;
pub mod models;

pub use error::{Result, ShambaOpsError};

/// Version stamped into every advice metadata block.
pub const API_VERSION: &str = "1.0.0";
