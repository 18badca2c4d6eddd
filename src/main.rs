mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filecreator::{DatePosition, FileType};
use std::path::PathBuf;
use termcolor::ColorChoice;

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser)]
#[command(name = "filecreator")]
#[command(about = "Create notes, PDFs, kanban boards, bases and drawings from vault templates")]
#[command(version)]
struct Cli {
    /// Vault directory (overrides $FILECREATOR_VAULT)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// When to use colors (auto, always, never)
    #[arg(long, global = true, default_value = "auto", value_name = "WHEN")]
    color: ColorChoice,

    #[command(subcommand)]
    command: Commands,
}

/// Resolve vault directory from CLI arg, env var, or default
fn resolve_vault_dir(cli_arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = cli_arg {
        return Ok(dir);
    }

    if let Ok(env_dir) = std::env::var("FILECREATOR_VAULT") {
        return Ok(PathBuf::from(env_dir));
    }

    // Default: $XDG_DATA_HOME/filecreator or ~/.local/share/filecreator
    let data_home = if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data)
    } else {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        PathBuf::from(home).join(".local/share")
    };

    Ok(data_home.join("filecreator"))
}

#[derive(Subcommand)]
enum Commands {
    /// Set up a vault with template folders and a config file
    Init,

    /// Create a new file
    New {
        /// Base file name (prompted for when omitted)
        name: Option<String>,

        /// Destination folder, `/` for the vault root
        #[arg(long, short, default_value = "/")]
        folder: String,

        /// File type (markdown, pdf, kanban, base, drawing)
        #[arg(long = "type", short = 't')]
        file_type: Option<FileType>,

        /// Where to put the date (none, prefix, suffix)
        #[arg(long)]
        date: Option<DatePosition>,

        /// Template file name in the type's template folder
        #[arg(long)]
        template: Option<String>,

        /// Kanban column (can be specified multiple times)
        #[arg(long = "header")]
        headers: Vec<String>,

        /// Kanban column that holds completed tasks (can be specified multiple times)
        #[arg(long = "completed")]
        completed: Vec<String>,

        /// Contents of a base file
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// Read the contents of a base file from this path
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Note to embed the new file into
        #[arg(long, conflicts_with = "no_embed")]
        embed: Option<String>,

        /// Do not embed, even if auto-embed is configured
        #[arg(long)]
        no_embed: bool,

        /// Open the new file in $EDITOR
        #[arg(long)]
        open: bool,
    },

    /// List folders new files can be created in
    Folders,

    /// List templates for a file type
    Templates {
        /// File type (defaults to the configured file type)
        #[arg(long = "type", short = 't')]
        file_type: Option<FileType>,
    },

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective settings
    Show,

    /// Change a setting and save it
    Set {
        /// Setting key, e.g. date_format or pdf.folder
        key: String,

        /// New value (comma-separated for kanban lists)
        value: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli_args = Cli::parse();
    let vault_dir = resolve_vault_dir(cli_args.vault)?;

    match cli_args.command {
        Commands::Init => {
            cli::commands::init(&vault_dir)?;
        }
        Commands::New {
            name,
            folder,
            file_type,
            date,
            template,
            headers,
            completed,
            content,
            content_file,
            embed,
            no_embed,
            open,
        } => {
            let base_content = match content_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                None => content,
            };

            let embed = if no_embed {
                cli::EmbedChoice::Skip
            } else {
                match embed {
                    Some(target) => cli::EmbedChoice::Into(target),
                    None => cli::EmbedChoice::Configured,
                }
            };

            let options = cli::NewOptions {
                name,
                folder,
                file_type,
                date,
                template,
                headers,
                completed,
                base_content,
                embed,
                open,
            };
            cli::commands::new(&vault_dir, options, cli_args.color)?;
        }
        Commands::Folders => {
            cli::commands::folders(&vault_dir)?;
        }
        Commands::Templates { file_type } => {
            cli::commands::templates(&vault_dir, file_type, cli_args.color)?;
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => {
                cli::commands::config_show(&vault_dir)?;
            }
            ConfigCommands::Set { key, value } => {
                cli::commands::config_set(&vault_dir, &key, &value, cli_args.color)?;
            }
        },
    }

    Ok(())
}
