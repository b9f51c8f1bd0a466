//! Core process state shared across the codebase.

mod state;

pub use state::{
    is_serving, is_shutdown, pad_channel, register_pad_channel, register_server, set_serving,
    setup_shutdown_handler,
};
