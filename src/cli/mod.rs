//! CLI module for the habitual-be binary
//!
//! This module contains the command-line interface structure, argument parsing,
//! and output helpers. Individual command implementations are in the `commands` submodule.

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use output::*;
pub use parser::*;
pub use utils::*;
