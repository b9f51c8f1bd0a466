//! Shared configuration machinery: the error type and the global handle
//! serve mode reads from.

mod error;
pub mod handle;

pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};
