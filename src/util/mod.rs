//! Shared utilities

pub mod args;
pub mod config;
pub mod context;
pub mod fs;
pub mod process;

pub use args::{parse_key_value_pairs, ArgError};
pub use config::Config;
pub use context::GlobalContext;
