//! `ts-doc-gen` - single-page TypeScript API reference builder
//!
//! Runs TypeDoc's markdown theme, merges the per-symbol pages it writes
//! into one reference document and rewrites cross-page links into
//! in-page anchors.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod observability;
pub mod output;
pub mod pipeline;
pub mod reference;
