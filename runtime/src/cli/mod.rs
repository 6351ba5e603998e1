//! CLI subcommand implementations for the phishscope binary.

pub mod check_cmd;
pub mod classify_cmd;
pub mod features_cmd;
pub mod output;
