// File: mod.rs
// Description:
//    Workflows behind the subcommands of the CLI.
//    `run` analyses one structure, `batch` analyses a list of structures in
//    parallel and `config` writes or checks a TOML configuration.

pub mod batch;
pub mod config;
pub mod run;
