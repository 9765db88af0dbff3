//! graphsh - an interactive command shell for graph databases
//!
//! Lines are either built-in commands (`:help`, `:set`, `:begin`, ...) or
//! query-language statements forwarded to the database with the current
//! parameters bound.

pub mod cli;
pub mod client;
pub mod commands;
pub mod observability;
pub mod render;
pub mod shell;
