//! Command-line front-end for the BPJS proxy.
//!
//! `commands` maps subcommands onto a `bpjs_core::Session`, `transport`
//! supplies the reqwest-backed I/O, and `config` resolves the base URL and
//! log filter.

pub mod commands;
pub mod config;
pub mod transport;

pub use commands::{run, run_shell, Cli, Command};
pub use config::{load_settings, Settings};
pub use transport::ReqwestTransport;
