//! Manual entry command handlers.

use tabled::Tabled;

use pulsewatch_api::models::ManualEntry;
use pulsewatch_core::{ManualEntryDraft, Session};

use crate::cli::{GlobalOpts, ManualArgs, ManualCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "PLATFORM")]
    platform: String,
    #[tabled(rename = "AUTHOR")]
    author: String,
    #[tabled(rename = "TEXT")]
    text: String,
}

impl From<&ManualEntry> for EntryRow {
    fn from(entry: &ManualEntry) -> Self {
        Self {
            id: entry.id.clone(),
            platform: entry.platform.clone(),
            author: entry.author.clone().unwrap_or_default(),
            text: output::truncate(&entry.text, 60),
        }
    }
}

pub async fn handle(
    session: &Session,
    args: ManualArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ManualCommand::List => {
            let mut sub = session.manual().entries();
            let snap = util::settle(&mut sub).await?;
            let entries = snap
                .data
                .as_deref()
                .and_then(pulsewatch_core::QueryData::as_manual_entries)
                .ok_or_else(|| CliError::Query {
                    message: "manual entries query resolved without data".into(),
                })?;

            let rendered = output::render_list(
                &global.output,
                entries,
                |entry| EntryRow::from(entry),
                |entry| entry.id.clone(),
            );
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ManualCommand::Add {
            text,
            platform,
            author,
            url,
            tags,
        } => {
            let mut draft = ManualEntryDraft {
                platform,
                text,
                author: author.unwrap_or_default(),
                url: url.unwrap_or_default(),
                tags: tags.unwrap_or_default(),
            };
            let created = session.manual().submit(&mut draft).await?;
            if !global.quiet {
                eprintln!("Created manual entry {}", created.id);
            }
            Ok(())
        }

        ManualCommand::Rm { id } => {
            if !util::confirm(&format!("Delete manual entry '{id}'?"), global.yes)? {
                return Ok(());
            }
            session.manual().delete(&id).await?;
            if !global.quiet {
                eprintln!("Deleted manual entry {id}");
            }
            Ok(())
        }
    }
}
