//! Airlinks CLI
//!
//! Command-line access to Airtable lists and their links.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use airlinks_airtable::{AirtableClient, LinksService};
use airlinks_core::error::AirlinksError;
use airlinks_core::types::{Link, Settings};
use airlinks_core::validate::IdKind;

/// Airlinks - Airtable lists as links
#[derive(Parser)]
#[command(name = "airlinks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (values from AIRTABLE_* environment variables take precedence)
    #[arg(short, long, global = true, env = "AIRLINKS_SETTINGS", default_value = "airlinks.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the links of a list
    Links {
        /// List record ID or URL
        list: String,
        /// Print JSON instead of markdown
        #[arg(long)]
        json: bool,
        /// Repeat the lookup to exercise the cache
        #[arg(long, default_value = "1")]
        repeat: usize,
    },

    /// Show a list's name and declared link IDs
    List {
        /// List record ID or URL
        list: String,
    },

    /// Report which identifier kind a value matches
    Validate {
        /// Value to check
        value: String,
    },

    /// Write connection settings interactively
    Configure,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "airlinks=debug,info"
    } else {
        "airlinks=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Links { list, json, repeat } => {
            cmd_links(&cli.settings, &list, json, repeat).await
        }
        Commands::List { list } => cmd_list(&cli.settings, &list).await,
        Commands::Validate { value } => cmd_validate(&value),
        Commands::Configure => cmd_configure(&cli.settings),
    }
}

/// Loads settings: environment first, settings file for the rest.
fn load_settings(path: &Path) -> Result<Settings> {
    let file = Settings::load(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings = Settings::from_env().or(file);
    settings
        .validate()
        .context("Run `airlinks configure` or set the AIRTABLE_* environment variables")?;
    Ok(settings)
}

fn build_service(path: &Path) -> Result<LinksService<AirtableClient>> {
    let settings = load_settings(path)?;
    Ok(LinksService::airtable(settings)?)
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Attaches the short notice text to a resolution error.
fn explain(err: AirlinksError) -> anyhow::Error {
    let notice = err.user_message();
    anyhow::Error::new(err).context(notice)
}

/// Fetch links
async fn cmd_links(settings: &Path, list: &str, json: bool, repeat: usize) -> Result<()> {
    let service = build_service(settings)?;

    for round in 0..repeat.max(1) {
        let pb = spinner("Fetching links...")?;
        let result = service.get_links_detailed(list).await;
        pb.finish_and_clear();
        let result = result.map_err(explain)?;

        if round > 0 {
            let source = if result.from_cache { "cache" } else { "remote" };
            println!("{} {}", "↻ Served from".dimmed(), source.dimmed());
            continue;
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&result.links)?);
        } else {
            print_links(&result.links);
        }
    }

    let stats = service.cache_stats();
    tracing::debug!(entries = stats.total_entries, links = stats.cached_links, "Cache state");
    Ok(())
}

fn print_links(links: &[Link]) {
    if let Some(first) = links.first() {
        println!("{} {}", "📋".cyan(), first.list.bold());
    }
    for link in links {
        let line = link.to_markdown();
        if link.done {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
        if let Some(created) = link.created_at() {
            println!("   {} {}", "added".dimmed(), created.format("%Y-%m-%d").to_string().dimmed());
        }
    }
    println!("\n{} {} link(s)", "✅".green(), links.len());
}

/// Show a list
async fn cmd_list(settings: &Path, list: &str) -> Result<()> {
    let service = build_service(settings)?;

    let pb = spinner("Resolving list...")?;
    let resolved = service.resolve_list(list).await;
    pb.finish_and_clear();
    let resolved = resolved.map_err(explain)?;

    println!("{} {}", "📋 List:".cyan().bold(), resolved.name);
    println!("   {} {}", "ID:".dimmed(), resolved.id);
    println!("   {} {}", "Links:".dimmed(), resolved.links.len());
    for id in &resolved.links {
        println!("     {}", id);
    }
    Ok(())
}

/// Validate an identifier
fn cmd_validate(value: &str) -> Result<()> {
    match IdKind::classify(value) {
        Some(kind) => {
            println!("{} {} ID", "✅ Valid".green(), kind);
            Ok(())
        }
        None => anyhow::bail!("'{}' is not a base, table or record ID", value),
    }
}

/// Write settings interactively
fn cmd_configure(path: &Path) -> Result<()> {
    let mut settings = Settings::load(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    println!("{} {}", "⚙️  Configuring".cyan().bold(), path.display());

    let token = Password::new()
        .with_prompt("Airtable Personal Access Token (empty keeps current)")
        .allow_empty_password(true)
        .interact()?;
    if !token.is_empty() {
        settings.set_access_token(token);
    }

    let base: String = Input::new()
        .with_prompt("Base ID")
        .with_initial_text(settings.base_id.clone())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            Settings::default().set_base_id(input).map_err(|e| e.to_string())
        })
        .interact_text()?;
    settings.set_base_id(&base)?;

    let lists: String = Input::new()
        .with_prompt("Lists Table ID")
        .with_initial_text(settings.lists_table_id.clone())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            Settings::default().set_lists_table_id(input).map_err(|e| e.to_string())
        })
        .interact_text()?;
    settings.set_lists_table_id(&lists)?;

    let links: String = Input::new()
        .with_prompt("Links Table ID")
        .with_initial_text(settings.links_table_id.clone())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            Settings::default().set_links_table_id(input).map_err(|e| e.to_string())
        })
        .interact_text()?;
    settings.set_links_table_id(&links)?;

    settings.save(path)?;
    println!("{} {}", "✅ Settings saved to:".green(), path.display());
    Ok(())
}
