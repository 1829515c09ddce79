//! Utility functions for CLI commands

use std::io::{self, Read};
use std::path::PathBuf;

use crate::config::{self, AnnotateConfig};

/// Get input text from various sources (text arg, file, or stdin)
pub fn get_input_text(
    text: &Option<String>,
    file: Option<&str>,
    positional: &[String],
) -> Result<String, String> {
    if let Some(t) = text {
        Ok(t.clone())
    } else if let Some(f) = file {
        read_input_file(f)
    } else if !positional.is_empty() {
        Ok(positional.join(" "))
    } else {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    }
}

/// Read input from file
pub fn read_input_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path, e))
}

/// Load the config named on the command line, else the user config, else defaults
pub fn load_config(path: Option<&str>) -> Result<AnnotateConfig, String> {
    let path = path.map(PathBuf::from);
    AnnotateConfig::load_or_default(path.as_deref())
        .map_err(|e| format!("Failed to load config: {}", e))
}

/// Path of the per-user config file
pub fn get_config_path() -> Result<PathBuf, String> {
    config::default_path().ok_or_else(|| "Could not determine config directory".to_string())
}
