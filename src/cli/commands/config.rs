//! Config command - Configuration management

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::super::output::{color, write_output};
use super::super::utils::{get_config_path, load_config};

use crate::AnnotateConfig;

/// Configuration management
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Action to perform
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective config as TOML
    Show {
        /// Config file (default: user config, else built-in defaults)
        #[arg(long, value_name = "PATH")]
        config: Option<String>,
    },

    /// Write the default config
    Init {
        /// Destination (default: user config path)
        #[arg(long, value_name = "PATH")]
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs) -> Result<(), String> {
    match args.action {
        ConfigAction::Show { config } => {
            let config = load_config(config.as_deref())?;
            let text = config
                .to_toml_string()
                .map_err(|e| format!("Failed to serialize config: {}", e))?;
            write_output(&text, None)
        }
        ConfigAction::Init { path, force } => {
            let path = match path {
                Some(p) => PathBuf::from(p),
                None => get_config_path()?,
            };
            if path.exists() && !force {
                return Err(format!(
                    "Config already exists: {} (use --force to overwrite)",
                    path.display()
                ));
            }
            AnnotateConfig::default()
                .save(&path)
                .map_err(|e| format!("Failed to write config: {}", e))?;
            println!("{} wrote {}", color("32", "ok:"), path.display());
            Ok(())
        }
    }
}
