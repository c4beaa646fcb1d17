//! Service configuration command handlers.

use std::fmt::Write as _;

use pulsewatch_api::models::{ServiceSettings, YouTubeChannel};
use pulsewatch_core::Session;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session,
    args: ConfigArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(session, global).await,

        ConfigCommand::Keywords { keywords } => {
            session.settings().update_keywords(&keywords).await?;
            if !global.quiet {
                eprintln!("Keywords updated ({} total)", keywords.len());
            }
            Ok(())
        }

        ConfigCommand::Youtube { channels } => {
            let channels = channels
                .iter()
                .map(|raw| parse_channel(raw))
                .collect::<Result<Vec<_>, _>>()?;
            session.settings().update_youtube_channels(&channels).await?;
            if !global.quiet {
                eprintln!("YouTube channels updated ({} total)", channels.len());
            }
            Ok(())
        }

        ConfigCommand::Twitter { accounts } => {
            session.settings().update_twitter_accounts(&accounts).await?;
            if !global.quiet {
                eprintln!("Twitter accounts updated ({} total)", accounts.len());
            }
            Ok(())
        }
    }
}

async fn show(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let mut sub = session.settings().observe();
    let snap = util::settle(&mut sub).await?;
    let settings = snap
        .data
        .as_deref()
        .and_then(pulsewatch_core::QueryData::as_settings)
        .ok_or_else(|| CliError::Query {
            message: "settings query resolved without data".into(),
        })?;

    let rendered = output::render_single(&global.output, settings, detail, |s| {
        s.keywords.join("\n")
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Parse a `NAME=CHANNEL_ID` argument into a channel record.
fn parse_channel(raw: &str) -> Result<YouTubeChannel, CliError> {
    let (name, channel_id) = raw.split_once('=').ok_or_else(|| CliError::Validation {
        field: "channels".into(),
        reason: format!("expected NAME=CHANNEL_ID, got '{raw}'"),
    })?;
    if name.is_empty() || channel_id.is_empty() {
        return Err(CliError::Validation {
            field: "channels".into(),
            reason: format!("expected NAME=CHANNEL_ID, got '{raw}'"),
        });
    }
    Ok(YouTubeChannel {
        name: name.to_string(),
        channel_id: channel_id.to_string(),
    })
}

fn detail(settings: &ServiceSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Keywords:         {}", settings.keywords.join(", "));
    let _ = writeln!(
        out,
        "YouTube channels: {}",
        settings
            .youtube_channels
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let _ = writeln!(
        out,
        "Twitter accounts: {}",
        settings.twitter_accounts.join(", ")
    );
    let _ = writeln!(out, "Check interval:   {} min", settings.check_interval);
    let _ = writeln!(
        out,
        "Max posts/platform: {}",
        settings.max_posts_per_platform
    );

    if !settings.api_configured.is_empty() {
        let _ = writeln!(out, "\nAPI credentials:");
        let mut apis: Vec<_> = settings.api_configured.iter().collect();
        apis.sort_by(|a, b| a.0.cmp(b.0));
        for (name, configured) in apis {
            let mark = if *configured { "configured" } else { "missing" };
            let _ = writeln!(out, "  {name:<12} {mark}");
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_args_parse_name_and_id() {
        let channel = parse_channel("RustConf=UC1234").unwrap();
        assert_eq!(channel.name, "RustConf");
        assert_eq!(channel.channel_id, "UC1234");

        assert!(parse_channel("no-separator").is_err());
        assert!(parse_channel("=UC1234").is_err());
        assert!(parse_channel("name=").is_err());
    }
}
