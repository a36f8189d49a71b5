use std::path::PathBuf;

use anyhow::{Context, Result};
use browser_core::{
    filter::filter_records, BrowserConfig, Directory, IntakeForm, IntakeSink, LoggingIntakeSink,
};
use clap::{Parser, Subcommand};
use shared::domain::{UserId, UserRecord};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// TOML or JSON directory file replacing the built-in users.
    #[arg(long, global = true)]
    directory: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List users, optionally filtered by name or id.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one user with its reason and clip.
    Show { id: String },
    /// Validate and submit a new entry.
    Add {
        #[arg(long, default_value = "")]
        discord_id: String,
        #[arg(long, default_value = "")]
        reason: String,
        #[arg(long)]
        clip: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = BrowserConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(directory) = cli.directory {
        config.directory_path = Some(directory);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let directory = match &config.directory_path {
        Some(path) => Directory::load(path)
            .with_context(|| format!("loading user directory from {}", path.display()))?,
        None => Directory::builtin(),
    };

    let output = match cli.command {
        Command::List { search, json } => {
            list_users(&directory, search.as_deref().unwrap_or(""), json)?
        }
        Command::Show { id } => show_user(&directory, &UserId::new(id))?,
        Command::Add {
            discord_id,
            reason,
            clip,
        } => add_user(&LoggingIntakeSink, discord_id, reason, clip)?,
    };
    println!("{output}");
    Ok(())
}

fn list_users(directory: &Directory, search: &str, json: bool) -> Result<String> {
    let visible = filter_records(directory.records(), search);
    if json {
        return Ok(serde_json::to_string_pretty(&visible)?);
    }
    if visible.is_empty() {
        return Ok("No users found.".to_string());
    }
    let lines: Vec<String> = visible.iter().map(|record| list_line(record)).collect();
    Ok(lines.join("\n"))
}

fn list_line(record: &UserRecord) -> String {
    let clip = if record.playable_video().is_some() {
        "  [clip]"
    } else {
        ""
    };
    format!("{:<20}  {:<23}{clip}", record.id.as_str(), record.truncated_name())
}

fn show_user(directory: &Directory, id: &UserId) -> Result<String> {
    let record = directory
        .get(id)
        .with_context(|| format!("no user with id {id}"))?;
    let mut out = format!(
        "{}\nid: {}\nreason: {}",
        record.name,
        record.id,
        record.reason_or_default()
    );
    match record.playable_video() {
        Some(url) => out.push_str(&format!("\nclip: {url}")),
        None if record.has_clip => out.push_str("\nclip: No video available"),
        None => {}
    }
    Ok(out)
}

fn add_user(
    sink: &dyn IntakeSink,
    discord_id: String,
    reason: String,
    clip: bool,
) -> Result<String> {
    let mut form = IntakeForm::default();
    form.open();
    form.set_discord_id(discord_id);
    form.set_reason(reason);
    form.set_clip(clip);

    let submission = form.submit()?;
    sink.accept(&submission)?;
    Ok(format!("submitted entry for {}", submission.discord_id))
}
