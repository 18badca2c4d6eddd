//! Command implementations
//!
//! All CLI command logic is implemented here as functions that are called
//! from the main entry point.

use super::colors;
use super::utils::{pluralize, prompt};
use super::{EmbedChoice, NewOptions};
use anyhow::{Context, Result};
use filecreator::{
    CreateError, CreatorConfig, FileCreator, FileType, KanbanSpec, Notice, RealStorage, Storage,
    TypeOptions,
};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use termcolor::{ColorChoice, WriteColor};

fn open_vault(vault_dir: &Path) -> Result<FileCreator> {
    if !vault_dir.is_dir() {
        anyhow::bail!(
            "Vault not found at: {}\nRun `filecreator init` to create one.",
            vault_dir.display()
        );
    }
    let storage = Box::new(RealStorage::new(vault_dir.to_path_buf()));
    Ok(FileCreator::with_defaults(storage))
}

// ============================================================================
// Core Commands
// ============================================================================

pub fn init(vault_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(vault_dir)
        .with_context(|| format!("Failed to create vault directory: {}", vault_dir.display()))?;
    println!("Vault directory ready at: {}", vault_dir.display());

    let storage = RealStorage::new(vault_dir.to_path_buf());
    let config_path = Path::new(".filecreator/config.toml");

    if storage.exists(config_path) {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            vault_dir.join(config_path).display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = CreatorConfig::default();
    config.save(&storage)?;
    println!("Config created at: {}", vault_dir.join(config_path).display());

    for file_type in FileType::ALL {
        let Some(folder) = config.template_folder(file_type) else {
            continue;
        };
        let dir = filecreator::folders::vault_path(folder);
        storage.create_dir_all(&dir)?;
        println!("{} templates go in: {}", file_type, vault_dir.join(&dir).display());
    }

    println!("\nfilecreator is ready! Try:");
    println!("  filecreator new \"My First Note\"");

    Ok(())
}

pub fn new(vault_dir: &Path, options: NewOptions, color: ColorChoice) -> Result<()> {
    // CLI handles prompting for a missing name
    let name = match options.name {
        Some(name) => name,
        None => prompt("Enter file name: ")?,
    };

    let creator = open_vault(vault_dir)?;
    let config = creator.config();

    let mut request = creator.new_request(&name, &options.folder);
    if let Some(file_type) = options.file_type {
        request = request.with_file_type(file_type, config);
    }
    if let Some(date) = options.date {
        request.date_position = date;
    }
    if options.template.is_some() {
        request.template = options.template;
    }

    match request.file_type {
        FileType::Kanban if !options.headers.is_empty() || !options.completed.is_empty() => {
            let headers = if options.headers.is_empty() {
                config.kanban.headers.clone()
            } else {
                options.headers
            };
            request.options = TypeOptions::Kanban(KanbanSpec::new(headers, options.completed));
        }
        FileType::Base if options.base_content.is_some() => {
            request.options = TypeOptions::Base {
                buffer: options.base_content,
            };
        }
        _ => {}
    }

    match options.embed {
        EmbedChoice::Configured => {}
        EmbedChoice::Into(target) => request.embed_target = Some(target),
        EmbedChoice::Skip => request.embed_target = None,
    }

    let mut stdout = colors::create_stdout(color);
    let today = chrono::Local::now().date_naive();

    let outcome = match creator.create(&request, today) {
        Ok(outcome) => outcome,
        Err(e) => {
            print_notice(&mut stdout, &Notice::from(&e))?;
            if let CreateError::TemplateNotFound { file_type, .. } = &e {
                print_available_templates(&creator, *file_type)?;
            }
            anyhow::bail!("No file was created");
        }
    };

    for notice in &outcome.notices {
        print_notice(&mut stdout, notice)?;
    }

    stdout.set_color(&colors::success())?;
    write!(stdout, "Created:")?;
    stdout.reset()?;
    writeln!(stdout, " {}", vault_dir.join(&outcome.path).display())?;

    if let Some(note) = &outcome.embedded_into {
        writeln!(stdout, "Embedded into: {}", vault_dir.join(note).display())?;
    }

    if options.open || config.auto_open {
        launch_editor(&vault_dir.join(&outcome.path))?;
    }

    Ok(())
}

pub fn folders(vault_dir: &Path) -> Result<()> {
    let creator = open_vault(vault_dir)?;
    let folders = creator.list_folders()?;

    println!("/");
    for folder in &folders {
        println!("{}", folder.path);
    }

    let count = folders.len() + 1;
    println!("\nTotal: {} {}", count, pluralize(count, "folder", "folders"));

    Ok(())
}

pub fn templates(vault_dir: &Path, file_type: Option<FileType>, color: ColorChoice) -> Result<()> {
    let creator = open_vault(vault_dir)?;
    let file_type = file_type.unwrap_or(creator.config().file_type);

    if !file_type.requires_template_browse() {
        println!("{} files are generated without templates.", file_type);
        return Ok(());
    }

    let listing = creator.list_templates(file_type)?;
    if let Some(condition) = &listing.condition {
        let mut stdout = colors::create_stdout(color);
        print_notice(&mut stdout, &Notice::warning(condition.clone()))?;
        return Ok(());
    }

    let default = creator.config().default_template(file_type);
    for reference in &listing.templates {
        let marker = if Some(reference.name.as_str()) == default {
            " (default)"
        } else {
            ""
        };
        println!("{}{}", reference.name, marker);
    }

    println!(
        "\nTotal: {} {}",
        listing.templates.len(),
        pluralize(listing.templates.len(), "template", "templates")
    );

    Ok(())
}

// ============================================================================
// Config Commands
// ============================================================================

pub fn config_show(vault_dir: &Path) -> Result<()> {
    let creator = open_vault(vault_dir)?;
    let content =
        toml::to_string_pretty(creator.config()).context("Failed to serialize config")?;
    print!("{}", content);
    Ok(())
}

pub fn config_set(vault_dir: &Path, key: &str, value: &str, color: ColorChoice) -> Result<()> {
    let creator = open_vault(vault_dir)?;
    let creator = creator.with_setting(key, value).with_context(|| {
        format!(
            "Could not change {}. Known settings: {}",
            key,
            filecreator::config::SETTING_KEYS.join(", ")
        )
    })?;

    let mut stdout = colors::create_stdout(color);
    stdout.set_color(&colors::success())?;
    write!(stdout, "Saved")?;
    stdout.reset()?;
    writeln!(stdout, " {} = {}", key, value)?;

    log::debug!("Effective settings: {:?}", creator.config());
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn print_notice(stdout: &mut impl WriteColor, notice: &Notice) -> Result<()> {
    stdout.set_color(&colors::for_notice(notice.level))?;
    write!(stdout, "{}:", colors::label(notice.level))?;
    stdout.reset()?;
    writeln!(stdout, " {}", notice)?;
    Ok(())
}

fn print_available_templates(creator: &FileCreator, file_type: FileType) -> Result<()> {
    let listing = creator.list_templates(file_type)?;
    if !listing.templates.is_empty() {
        println!("Available templates: {}", listing.names().join(", "));
    }
    Ok(())
}

fn launch_editor(path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to open editor: {}", editor))?;

    if !status.success() {
        anyhow::bail!("Editor exited with status: {}", status);
    }

    Ok(())
}
