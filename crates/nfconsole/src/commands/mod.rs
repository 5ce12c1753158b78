//! Command handlers: bridge CLI args -> core Commands -> output formatting.

pub mod config_cmd;
pub mod form;
pub mod resource;
pub mod util;
