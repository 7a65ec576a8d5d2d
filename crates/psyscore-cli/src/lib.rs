//! psyscore-cli library root.
//!
//! Re-exports the config, auth gate and command layer so integration
//! tests can drive them without spawning the binary.

pub mod auth;
pub mod commands;
pub mod config;
