//! Monitoring control and status handlers.

use std::fmt::Write as _;
use std::time::Duration;

use owo_colors::OwoColorize;

use pulsewatch_api::models::{MonitoringState, MonitoringStatus};
use pulsewatch_core::Session;

use crate::cli::{GlobalOpts, MonitoringArgs, MonitoringCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session,
    args: MonitoringArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MonitoringCommand::Status { watch, duration } => {
            if watch {
                watch_status(session, duration, global).await
            } else {
                show_status(session, global).await
            }
        }

        MonitoringCommand::Start { interval } => {
            session.monitoring().start(interval).await?;
            if !global.quiet {
                eprintln!("Start acknowledged, polling for the transition...");
            }
            // The displayed state is never assumed; show what the
            // service reports after the control call.
            show_status(session, global).await
        }

        MonitoringCommand::Stop => {
            session.monitoring().stop().await?;
            if !global.quiet {
                eprintln!("Stop acknowledged, polling for the transition...");
            }
            show_status(session, global).await
        }

        MonitoringCommand::Fetch => {
            let results = session.monitoring().fetch_now().await?;
            let rendered = output::render_single(
                &global.output,
                &results,
                |r| {
                    let mut out = format!("Collected {} posts", r.total);
                    let mut platforms: Vec<_> = r.results.iter().collect();
                    platforms.sort_by(|a, b| a.0.cmp(b.0));
                    for (platform, count) in platforms {
                        let _ = write!(out, "\n  {platform:<12} {count}");
                    }
                    out
                },
                |r| r.total.to_string(),
            );
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}

async fn show_status(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let mut sub = session.monitoring().observe();
    let snap = util::settle(&mut sub).await?;
    let status = extract(&snap)?;
    print_status(&status, global);
    Ok(())
}

/// Poll and print every status change until interrupted or the optional
/// deadline passes.
async fn watch_status(
    session: &Session,
    duration: Option<u64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut sub = session.monitoring().observe();
    let snap = util::settle(&mut sub).await?;
    print_status(&extract(&snap)?, global);

    let deadline = duration.map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs));
    loop {
        let changed = match deadline {
            Some(at) => match tokio::time::timeout_at(at, sub.changed()).await {
                Ok(changed) => changed,
                Err(_) => return Ok(()),
            },
            None => sub.changed().await,
        };
        let Some(snap) = changed else { return Ok(()) };
        print_status(&extract(&snap)?, global);
    }
}

fn extract(snap: &pulsewatch_core::QuerySnapshot) -> Result<MonitoringStatus, CliError> {
    snap.data
        .as_deref()
        .and_then(pulsewatch_core::QueryData::as_monitoring)
        .cloned()
        .ok_or_else(|| CliError::Query {
            message: "status query resolved without data".into(),
        })
}

fn print_status(status: &MonitoringStatus, global: &GlobalOpts) {
    let rendered = output::render_single(
        &global.output,
        status,
        |s| detail(s, output::should_color(&global.color)),
        |s| s.status.to_string(),
    );
    output::print_output(&rendered, global.quiet);
}

fn detail(status: &MonitoringStatus, color: bool) -> String {
    let state = if color {
        match status.status {
            MonitoringState::Running => status.status.green().to_string(),
            MonitoringState::Stopped => status.status.red().to_string(),
        }
    } else {
        status.status.to_string()
    };

    let mut out = format!("Status:   {state}");
    if status.interval_minutes > 0 {
        let _ = write!(out, "\nInterval: {} min", status.interval_minutes);
    }
    if let Some(ref last) = status.last_check {
        let _ = write!(out, "\nLast check: {last}");
    }
    if let Some(secs) = status.next_check_in {
        let _ = write!(out, "\nNext check in: {secs}s");
    }
    out
}
