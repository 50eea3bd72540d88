//! Command implementations
//!
//! Each subcommand of the `capstan` binary lives in its own module.

pub mod check;
pub mod run;
