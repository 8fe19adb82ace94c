//! gerrit-trigger CLI entry point.
//!
//! Inspects the configured servers and triggers, and replays Gerrit stream
//! events against them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use gerrit_trigger::domain::{ANY_SERVER, PluginCommentAddedEvent};
use gerrit_trigger::infra::app_config::{self, AppConfig, TriggerConfig};
use gerrit_trigger::infra::events::registry::{EventTypeRegistry, PluginEvent};
use gerrit_trigger::infra::events::stream::parse_stream_events;
use gerrit_trigger::infra::servers::ServerStore;

#[derive(Parser, Debug)]
#[command(name = "gerrit-trigger")]
#[command(version)]
#[command(about = "Match Gerrit comment-added events against CI trigger rules", long_about = None)]
struct Args {
    /// Config file (defaults to $GERRIT_TRIGGER_CONFIG_PATH or the data dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List verdict categories for one server or all of them
    Categories {
        /// Server name, or __ANY__ for every configured server
        #[arg(short, long, default_value = ANY_SERVER)]
        server: String,
    },

    /// Test a comment against a pattern
    Match {
        /// Regular expression searched for anywhere in the comment
        #[arg(short, long)]
        pattern: String,
        /// Comment text (read from stdin when omitted)
        comment: Option<String>,
    },

    /// Replay stream-events JSON lines against the configured triggers
    Event {
        /// Only evaluate the trigger at this index
        #[arg(short, long)]
        trigger: Option<usize>,
        /// File with one event per line (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Append a comment-added trigger to the config file
    AddTrigger {
        /// Verdict category value the vote must be in
        #[arg(long, default_value = "")]
        category: String,
        /// Vote value that fires the trigger, e.g. +2
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        value: String,
        /// Regular expression searched for anywhere in the comment
        #[arg(long, default_value = "")]
        pattern: String,
    },

    /// List registered event types
    Types,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Categories { server } => {
            let config = load(args.config.as_deref())?;
            let store = ServerStore::new(config.servers);
            let items = store.fill_verdict_category_items(&server)?;
            for item in items {
                println!("{}\t{}", item.value, item.name);
            }
        }
        Commands::Match { pattern, comment } => {
            let comment = match comment {
                Some(comment) => comment,
                None => read_input(None)?,
            };
            let event = PluginCommentAddedEvent::new("", "", pattern);
            println!("{}", event.matches_comment(&comment)?);
        }
        Commands::Event { trigger, file } => {
            let config = load(args.config.as_deref())?;
            let triggers = build_triggers(&config, trigger)?;
            let input = read_input(file.as_deref())?;
            for (line, parsed) in parse_stream_events(&input) {
                let event = match parsed {
                    Ok(event) => event,
                    Err(err) => {
                        log::warn!("line {line}: {err}");
                        continue;
                    }
                };
                for (idx, trigger) in &triggers {
                    if trigger.event_kind() != event.kind() {
                        continue;
                    }
                    let fired = trigger
                        .should_trigger(&event)
                        .with_context(|| format!("trigger {idx}"))?;
                    println!(
                        "line {line}: trigger {idx} {}",
                        if fired { "fired" } else { "skipped" }
                    );
                }
            }
        }
        Commands::AddTrigger {
            category,
            value,
            pattern,
        } => {
            let path = args.config.unwrap_or_else(app_config::config_path);
            let mut config = app_config::load_config_or_default(&path)?;
            let event = PluginCommentAddedEvent::new(category, value, pattern);
            config.triggers.push(TriggerConfig::from_comment_added(&event)?);
            app_config::save_config_to(&path, &config)?;
            println!(
                "Added trigger {} to {}",
                config.triggers.len() - 1,
                path.display()
            );
        }
        Commands::Types => {
            let registry = EventTypeRegistry::default();
            for descriptor in registry.descriptors() {
                println!("{}\t{}", descriptor.id(), descriptor.display_name());
            }
        }
    }

    Ok(())
}

fn load(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => Ok(app_config::load_config_from(path)?),
        None => Ok(app_config::load_config()?),
    }
}

fn build_triggers(
    config: &AppConfig,
    only: Option<usize>,
) -> Result<Vec<(usize, Box<dyn PluginEvent>)>> {
    let registry = EventTypeRegistry::default();
    let mut triggers = Vec::new();
    for (idx, entry) in config.triggers.iter().enumerate() {
        if only.is_some_and(|wanted| wanted != idx) {
            continue;
        }
        let trigger = registry
            .build(&entry.kind, entry.fields.clone())
            .with_context(|| format!("Failed to build trigger {idx}"))?;
        triggers.push((idx, trigger));
    }
    if let Some(wanted) = only
        && triggers.is_empty()
    {
        anyhow::bail!("No trigger at index {wanted}");
    }
    Ok(triggers)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
