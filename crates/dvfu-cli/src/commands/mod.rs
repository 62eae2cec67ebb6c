//! Subcommand implementations.

pub mod blackbox;
pub mod config;
pub mod esa;
