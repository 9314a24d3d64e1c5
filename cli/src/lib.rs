//! Sessions that drive one orderfsm LIMIT BUY order from a TOML file,
//! a scripted event list, or an interactive prompt.

pub mod config;
pub mod error;
pub mod session;
