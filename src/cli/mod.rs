//! CLI module
//!
//! Command-line interface for browsing photo feeds.
//!
//! # Commands
//!
//! - `browse` - Refresh a feed, then load pages until exhausted
//! - `pages` - Print a random page sequence

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
