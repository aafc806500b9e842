//! `tincan config` subcommands.

use anyhow::Result;
use clap::{Args, Subcommand};
use tincan_core::KnownVerb;

use crate::config::{ConfigLoader, TincanConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (user and project layers merged)
    Show,
    /// Show configuration file paths
    Path,
    /// List known verbs and whether the configuration allows them
    Verbs,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => show_paths(),
        ConfigCommands::Verbs => show_verbs(),
    }
}

fn show_config() -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn show_paths() -> Result<()> {
    match ConfigLoader::user_config_path() {
        Some(path) => println!("User config:    {}{}", path.display(), marker(path.exists())),
        None => println!("User config:    (no home directory)"),
    }
    let project = ConfigLoader::project_config_path();
    println!("Project config: {}{}", project.display(), marker(project.exists()));
    Ok(())
}

fn show_verbs() -> Result<()> {
    let config = ConfigLoader::load()?;
    for line in verb_table(&config) {
        println!("{line}");
    }
    Ok(())
}

fn marker(exists: bool) -> &'static str {
    if exists { "" } else { " (not found)" }
}

/// One line per known verb: name, IRI and its role in the configuration.
fn verb_table(config: &TincanConfig) -> Vec<String> {
    let positive = config.xapi.positive_verb().ok();

    KnownVerb::ALL
        .iter()
        .map(|verb| {
            let allowed = config
                .xapi
                .allowed_verbs
                .iter()
                .any(|name| name == verb.as_str());
            let mut flags = Vec::new();
            if allowed {
                flags.push("allowed");
            }
            if positive == Some(*verb) {
                flags.push("positive");
            }
            format!("{:<12} {:<45} {}", verb.as_str(), verb.iri(), flags.join(","))
                .trim_end()
                .to_string()
        })
        .collect()
}
