//! CLI support for the `fts` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
