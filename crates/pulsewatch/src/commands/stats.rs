//! Aggregate statistics handler.

use std::fmt::Write as _;

use pulsewatch_api::models::PostStats;
use pulsewatch_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let mut sub = session.stats().observe();
    let snap = util::settle(&mut sub).await?;

    let stats = snap
        .data
        .as_deref()
        .and_then(pulsewatch_core::QueryData::as_stats)
        .ok_or_else(|| CliError::Query {
            message: "stats query resolved without data".into(),
        })?;

    let rendered = output::render_single(&global.output, stats, detail, |s| {
        s.total_posts.to_string()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(stats: &PostStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total posts:    {}", stats.total_posts);
    let _ = writeln!(out, "Total likes:    {}", stats.total_likes);
    let _ = writeln!(out, "Total comments: {}", stats.total_comments);
    let _ = writeln!(out, "Total shares:   {}", stats.total_shares);

    if !stats.by_platform.is_empty() {
        let _ = writeln!(out, "\nBy platform:");
        let mut platforms: Vec<_> = stats.by_platform.iter().collect();
        platforms.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (platform, count) in platforms {
            let _ = writeln!(out, "  {platform:<12} {count}");
        }
    }

    if let Some(ref updated) = stats.last_updated {
        let _ = writeln!(out, "\nLast updated: {updated}");
    }
    out.trim_end().to_string()
}
