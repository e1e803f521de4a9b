//! Subcommand implementations. Each submodule handles one action.

mod fetch;

pub use fetch::run_fetch;
