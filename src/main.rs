#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use mindcare_chat::assistant::{converse, AssistantResponder};
use mindcare_chat::config::AppConfig;
use mindcare_chat::logging::{init_logging, OperationTimer};
use mindcare_chat::metrics::MetricsCollector;
use mindcare_chat::models::{ContactFilters, PatientRecord, Priority, Role, ASSISTANT_ID};
use mindcare_chat::seed::{demo_roster, RecordTriage};
use mindcare_chat::sentiment::{classify, suggestions_for, RandomSelector, ResponseSelector};
use mindcare_chat::store::ChatStore;
use mindcare_chat::validation::InputValidator;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to config/default, config/local, config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to this file as well
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the sentiment of a text
    Classify {
        /// Text to classify
        text: String,
    },
    /// List the contacts a viewer would see
    Contacts {
        /// Viewer role (servidor, psicologo, medico, admin)
        #[arg(short, long, default_value = "psicologo")]
        role: Role,

        /// Free-text search over name and role
        #[arg(short, long)]
        search: Option<String>,

        /// Only contacts currently online
        #[arg(long)]
        online: bool,

        /// Exact role label, e.g. "Psicólogo"
        #[arg(long)]
        filter_role: Option<String>,

        /// Exact priority (low, medium, high, urgent)
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Pin these contact ids before listing
        #[arg(long)]
        pin: Vec<String>,

        /// Patient roster as a JSON array
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Talk to the assistant
    Chat {
        /// Viewer role
        #[arg(short, long, default_value = "servidor")]
        role: Role,

        /// Viewer display name
        #[arg(short, long, default_value = "Você")]
        name: String,

        /// Fix the reply choice for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Messages to send, in order
        #[arg(required = true)]
        messages: Vec<String>,

        /// Print the final conversation as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file_path.as_ref().map(PathBuf::from));
    let _guard = init_logging(
        Some(&config.get_log_level()),
        config.log_format()?,
        log_file.as_deref(),
    )?;

    info!("Starting mindcare-chat");

    match cli.command {
        Commands::Classify { text } => classify_text(&text),
        Commands::Contacts {
            role,
            search,
            online,
            filter_role,
            priority,
            pin,
            roster,
            json,
        } => {
            let filters = ContactFilters {
                online,
                role: filter_role,
                priority,
            };
            list_contacts(&config, role, search.as_deref(), filters, &pin, roster.as_deref(), json)?;
        }
        Commands::Chat {
            role,
            name,
            seed,
            messages,
            json,
        } => chat(&config, role, &name, seed, &messages, json)?,
    }

    Ok(())
}

/// Print the classification, confidence and suggestions for `text`
fn classify_text(text: &str) {
    let result = classify(text);
    println!("sentiment:  {}", result.sentiment);
    println!("confidence: {:.2}", result.confidence);
    for suggestion in suggestions_for(result.sentiment) {
        println!("  - {suggestion}");
    }
}

/// Load a patient roster, falling back to the demo roster
fn load_roster(path: Option<&Path>) -> Result<Vec<PatientRecord>> {
    let Some(path) = path else {
        debug!("No roster given, using demo roster");
        return Ok(demo_roster());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    let records: Vec<PatientRecord> =
        serde_json::from_str(&raw).context("Roster must be a JSON array of patients")?;

    let mut valid = Vec::with_capacity(records.len());
    for record in records {
        match InputValidator::validate_contact_name(&record.name)
            .and_then(|()| InputValidator::validate_contact_id(&record.id))
        {
            Ok(()) => valid.push(record),
            Err(e) => warn!(patient_id = %record.id, error = %e, "Skipping roster entry"),
        }
    }
    info!("Loaded {} patients from roster", valid.len());
    Ok(valid)
}

fn list_contacts(
    config: &AppConfig, role: Role, search: Option<&str>, filters: ContactFilters, pins: &[String], roster: Option<&Path>,
    json: bool,
) -> Result<()> {
    let metrics = MetricsCollector::default();
    let timer = OperationTimer::start("list_contacts", &metrics);
    let roster = load_roster(roster)?;
    let mut store = ChatStore::for_session(role, &roster, &RecordTriage::default(), config.chat.clone(), Utc::now());

    for id in pins {
        if !store.toggle_pin(id) {
            warn!("Unknown contact id: {}", id);
        }
    }
    if let Some(query) = search {
        store.set_search_query(query)?;
    }
    store.set_filters(filters);

    let visible = store.visible_contacts();
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        for contact in &visible {
            let pinned = store.conversation(&contact.id).is_some_and(|c| c.is_pinned);
            println!(
                "{:<1} {:<28} {:<16} {:<8} {:<7} unread={}",
                if pinned { "*" } else { "" },
                contact.name,
                contact.role,
                contact.priority,
                if contact.online { "online" } else { "offline" },
                contact.unread_count,
            );
        }
    }
    timer.finish();
    Ok(())
}

fn chat(config: &AppConfig, role: Role, name: &str, seed: Option<u64>, messages: &[String], json: bool) -> Result<()> {
    if !config.assistant.enabled {
        warn!("Assistant disabled by configuration");
        return Ok(());
    }

    let mut store = ChatStore::for_session(role, &demo_roster(), &RecordTriage::default(), config.chat.clone(), Utc::now());
    let selector: Box<dyn ResponseSelector> = match seed.or(config.assistant.rng_seed) {
        Some(seed) => Box::new(RandomSelector::seeded(seed)),
        None => Box::new(RandomSelector::new()),
    };
    let mut responder = AssistantResponder::new(&config.chat.assistant_name, selector);

    for text in messages {
        match converse(&mut store, &mut responder, "viewer", name, text, Utc::now())? {
            Some(reply) => {
                if !json {
                    println!("{name}: {text}");
                    println!(
                        "{} [{} {:.2}]: {}",
                        reply.message.sender_name,
                        reply.classification.sentiment,
                        reply.classification.confidence,
                        reply.message.content
                    );
                    for suggestion in &reply.suggestions {
                        println!("    > {suggestion}");
                    }
                }
            }
            None => warn!("No assistant conversation in this session"),
        }
    }

    if json {
        if let Some(conversation) = store.conversation(ASSISTANT_ID) {
            println!("{}", serde_json::to_string_pretty(conversation)?);
        }
    }
    Ok(())
}
