//! CLI subcommands
//!
//! Each subcommand is a clap `Args` struct with an async `execute` that
//! draws its adapters and use cases from the shared
//! [`CommandContext`](crate::context::CommandContext).

pub mod account;
pub mod list;
pub mod pull;
pub mod transfer;
