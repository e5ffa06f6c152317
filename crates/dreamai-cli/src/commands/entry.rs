use chrono::{Local, Utc};
use clap::Subcommand;
use dreamai_core::{parse_recorded_at, Config, JournalEntry};

use super::open_store;

#[derive(Subcommand)]
pub enum EntryAction {
    /// Record a dream
    Add {
        /// Short title
        title: String,
        /// Transcribed narration
        #[arg(long, default_value = "")]
        transcript: String,
        /// When it was recorded (RFC 3339 or YYYY-MM-DD); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// List recorded dreams, oldest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a dream by id
    Delete {
        /// Entry id
        id: String,
    },
}

pub fn run(action: EntryAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;

    match action {
        EntryAction::Add {
            title,
            transcript,
            at,
        } => {
            let recorded_at = match at {
                Some(value) => parse_recorded_at(&value)?,
                None => Utc::now(),
            };
            let entry = JournalEntry::new(title, transcript, recorded_at);
            store.add_entry(&entry)?;
            println!("{}", entry.id);
        }
        EntryAction::List { json } => {
            let entries = store.list_entries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("no entries");
            } else {
                for entry in &entries {
                    println!(
                        "{}  {}  {}",
                        entry.id,
                        entry.recorded_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                        entry.title
                    );
                }
            }
        }
        EntryAction::Delete { id } => {
            if !store.delete_entry(&id)? {
                return Err(format!("no entry with id {id}").into());
            }
            println!("deleted {id}");
        }
    }
    Ok(())
}
