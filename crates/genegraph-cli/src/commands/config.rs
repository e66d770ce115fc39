//! `genegraph config` subcommands

use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Setting name (see `config list`)
        key: String,
    },
    /// Change one setting and save the file
    Set { key: String, value: String },
    /// Reset one setting to its default
    Unset { key: String },
    /// Print every setting
    List,
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();

    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load_from(&path)?;
            println!("{}", lookup(&config, key)?);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            config.set(key, value)?;
            config.save_to(&path)?;
            tracing::info!("Updated {} in {}", key, path.display());
            println!("{} = {}", key, lookup(&config, key)?);
        }
        ConfigCommands::Unset { key } => {
            let mut config = Config::load_from(&path)?;
            let default = lookup(&Config::default(), key)?;
            config.set(key, &default)?;
            config.save_to(&path)?;
            println!("{} = {} (default)", key, default);
        }
        ConfigCommands::List => {
            let config = Config::load_from(&path)?;
            println!("# {}", describe(&path));
            for key in Config::keys() {
                println!("{} = {}", key, lookup(&config, key)?);
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; pass --force to replace it",
                    path.display()
                );
            }
            Config::default().save_to(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }

    Ok(())
}

fn lookup(config: &Config, key: &str) -> anyhow::Result<String> {
    config.get(key).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown config key: {}. Available keys: {}",
            key,
            Config::keys().join(", ")
        )
    })
}

fn describe(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not created, showing defaults)", path.display())
    }
}
