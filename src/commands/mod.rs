//! Command handlers for the CLI subcommands.

pub mod check;
pub mod index;
pub mod rule;
