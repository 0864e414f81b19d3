//! Command-line interface for inspecting resource documents.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;

use crate::codes::{Country, Language};
use crate::document::Document;
use crate::error::Result;
use crate::registry::Registry;
use crate::yaml::generate_yaml;

/// uitext - Inspect and query localized UI text resources.
#[derive(Parser)]
#[command(name = "uitext")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a resource document and summarize its groups.
    Check {
        /// Resource document (path or file:// descriptor)
        file: PathBuf,
    },

    /// Resolve one text with language and country fallback.
    Get {
        /// Resource document (path or file:// descriptor)
        file: PathBuf,

        /// Group name
        group: String,

        /// Text id within the group
        id: String,

        /// Language code (de, en, fr, it, es, pl, nl, ru, sys)
        #[arg(short, long, default_value = "en")]
        lang: Language,

        /// Country code (at, de, ch, uk, us, ru)
        #[arg(short, long)]
        country: Option<Country>,
    },

    /// Print all groups and entries as YAML.
    Dump {
        /// Resource document (path or file:// descriptor)
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => check_command(&file),
        Commands::Get {
            file,
            group,
            id,
            lang,
            country,
        } => get_command(&file, &group, &id, lang, country),
        Commands::Dump { file } => dump_command(&file),
    }
}

fn load(file: &Path) -> Result<Arc<Document>> {
    Registry::global().load_from_file(&file.display().to_string(), file)
}

/// Execute the check command.
fn check_command(file: &Path) -> Result<ExitCode> {
    let doc = load(file)?;
    let groups = doc.groups();

    println!(
        "{} {}",
        style("Valid").green().bold(),
        style(doc.source().descriptor()).cyan()
    );
    println!("  Groups: {}", groups.len());
    for (name, group) in groups.iter() {
        println!("  {} {} entries", style(name).bold(), group.len());
    }

    Ok(ExitCode::SUCCESS)
}

/// Execute the get command.
fn get_command(
    file: &Path,
    group: &str,
    id: &str,
    language: Language,
    country: Option<Country>,
) -> Result<ExitCode> {
    let doc = load(file)?;

    let Some(bound) = doc.get_group(group, language, country)? else {
        eprintln!("{} group '{group}'", style("Not found:").yellow().bold());
        return Ok(ExitCode::FAILURE);
    };

    match bound.get(id) {
        Some(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!(
                "{} '{id}' in group '{group}'",
                style("Not found:").yellow().bold()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Execute the dump command.
fn dump_command(file: &Path) -> Result<ExitCode> {
    let doc = load(file)?;
    print!("{}", generate_yaml(&doc)?);
    Ok(ExitCode::SUCCESS)
}
