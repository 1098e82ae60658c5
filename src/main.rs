use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

use strainer::discovery;
use strainer::engine::{RenameSession, parse_bulk_lines, plan_bulk};
use strainer::ident;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("strainer")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("strainer.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Pick the save folder to edit: --save flag, then config, then the first
/// auto-detected folder.
fn resolve_save_root(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(path) = &cli.save {
        return Ok(path.clone());
    }
    if let Some(path) = &config.save.path {
        info!("Using save folder from config: {}", path.display());
        return Ok(path.clone());
    }

    let mut saves = discovery::find_save_folders();
    if saves.is_empty() {
        return Err(eyre!(
            "no save folder found; pass --save <path> or set save.path in the config"
        ));
    }
    let location = saves.remove(0);
    info!("Auto-detected save folder: {}", location.path.display());
    println!("{} {}", "Save:".cyan(), location.label);
    Ok(location.path)
}

fn open_session(cli: &Cli, config: &Config) -> Result<RenameSession> {
    let root = resolve_save_root(cli, config)?;
    Ok(RenameSession::open(root))
}

fn report_backup(session: &RenameSession) {
    if let Some(path) = session.backup_path() {
        println!("{} {}", "Backup:".cyan(), path.display());
    }
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Saves => handle_saves_command(),
        Commands::List { filter } => handle_list_command(filter.as_deref(), cli, config),
        Commands::Rename { id, new_name } => handle_rename_command(id, new_name, cli, config),
        Commands::SetName { id, name } => handle_set_name_command(id, name, cli, config),
        Commands::SetId { old_id, new_id, name } => {
            handle_set_id_command(old_id, new_id, name.as_deref(), cli, config)
        }
        Commands::Bulk { file, dry_run } => handle_bulk_command(file, *dry_run, cli, config),
    }
}

fn handle_saves_command() -> Result<()> {
    let saves = discovery::find_save_folders();
    if saves.is_empty() {
        println!("{}", "No save folders found".yellow());
        return Ok(());
    }

    for location in saves {
        println!("{}", location.label.green());
        println!("  {}", location.path.display());
    }
    Ok(())
}

fn handle_list_command(filter: Option<&str>, cli: &Cli, config: &Config) -> Result<()> {
    let mut session = open_session(cli, config)?;
    let details = session.product_details()?;

    let filter = filter.map(str::to_lowercase);
    let mut shown = 0;
    for detail in &details {
        if let Some(needle) = &filter {
            if !detail.identifier.to_lowercase().contains(needle)
                && !detail.display_name.to_lowercase().contains(needle)
            {
                continue;
            }
        }
        shown += 1;
        println!(
            "{:<24} {:<28} {:<16} {}",
            detail.identifier,
            detail.display_name,
            detail.type_tag.replace("ProductData", ""),
            detail.properties.join(", ")
        );
    }

    println!("{} {} of {} products", "Listed:".cyan(), shown, details.len());
    Ok(())
}

fn handle_rename_command(id: &str, new_name: &str, cli: &Cli, config: &Config) -> Result<()> {
    let mut session = open_session(cli, config)?;
    let products = session.list_products()?;

    let base = ident::derive_identifier(new_name)?;
    if base == id {
        // same identifier, so only the display name moves
        session.rename_display_name(id, new_name)?;
        println!("{} {} now named {:?}", "Renamed:".green(), id, new_name);
    } else {
        let new_id = ident::uniquify(&base, |candidate| products.iter().any(|p| p == candidate));
        session.change_identifier(id, &new_id, Some(new_name))?;
        println!(
            "{} {} -> {} named {:?}",
            "Renamed:".green(),
            id,
            new_id,
            new_name
        );
    }

    report_backup(&session);
    Ok(())
}

fn handle_set_name_command(id: &str, name: &str, cli: &Cli, config: &Config) -> Result<()> {
    let mut session = open_session(cli, config)?;
    session.rename_display_name(id, name)?;
    println!("{} {} now named {:?}", "Renamed:".green(), id, name);
    report_backup(&session);
    Ok(())
}

fn handle_set_id_command(
    old_id: &str,
    new_id: &str,
    name: Option<&str>,
    cli: &Cli,
    config: &Config,
) -> Result<()> {
    let mut session = open_session(cli, config)?;
    session.change_identifier(old_id, new_id, name)?;
    println!("{} {} -> {}", "Changed:".green(), old_id, new_id);
    report_backup(&session);
    Ok(())
}

fn handle_bulk_command(file: &PathBuf, dry_run: bool, cli: &Cli, config: &Config) -> Result<()> {
    let text = fs::read_to_string(file)
        .context(format!("Failed to read rename list {}", file.display()))?;
    let entries = parse_bulk_lines(&text);
    if entries.is_empty() {
        println!("{}", "No rename entries found".yellow());
        return Ok(());
    }

    let mut session = open_session(cli, config)?;
    let products = session.list_products()?;
    let plan = plan_bulk(&entries, &products);

    for old_id in &plan.skipped {
        println!("{} {} (name has no usable characters)", "Skipped:".yellow(), old_id);
    }

    if dry_run {
        use strainer::engine::RenameRequest;
        for request in &plan.requests {
            match request {
                RenameRequest::Rename { old_id, new_name } => {
                    println!("  {} named {:?}", old_id, new_name);
                }
                RenameRequest::ChangeId { old_id, new_id, new_name } => {
                    println!("  {} -> {} named {:?}", old_id, new_id, new_name.as_deref().unwrap_or(""));
                }
            }
        }
        println!("{} {} entries planned", "Dry run:".cyan(), plan.requests.len());
        return Ok(());
    }

    let report = session.bulk_apply(&plan.requests)?;
    if report.failed == 0 {
        println!("{} {} products renamed", "Done:".green(), report.succeeded);
    } else {
        println!(
            "{} {} renamed, {} failed (see log)",
            "Partial:".yellow(),
            report.succeeded,
            report.failed
        );
    }

    report_backup(&session);
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
