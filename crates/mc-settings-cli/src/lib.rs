//! `mc-settings` diagnostics tool, library half.
//!
//! Argument parsing and report rendering used by the `mc-settings` binary.

pub mod cli;
pub mod report;
