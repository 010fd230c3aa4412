//! Command-line interface
//!
//! Argument parsing and the top-level command handler.

pub mod args;
pub mod commands;
