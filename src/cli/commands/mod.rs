//! Command implementations for the habitual-be CLI
//!
//! Each command has its own module/file for better organization.

pub mod annotate;
pub mod classify;
pub mod config;
pub mod lexicon;

// Re-export argument types for parser
pub use annotate::AnnotateArgs;
pub use classify::ClassifyArgs;
pub use config::{ConfigAction, ConfigArgs};
pub use lexicon::LexiconArgs;
