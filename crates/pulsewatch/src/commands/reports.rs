//! Report generation handlers.

use std::fmt::Write as _;

use pulsewatch_api::models::DashboardData;
use pulsewatch_core::{CoreError, Session};

use crate::cli::{GlobalOpts, ReportsArgs, ReportsCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: ReportsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReportsCommand::Dashboard => {
            let report = session
                .api()
                .generate_dashboard_report()
                .await
                .map_err(CoreError::from)?;
            if !global.quiet {
                eprintln!("{}", report.message);
                eprintln!("Saved to {}", report.path);
            }
            Ok(())
        }

        ReportsCommand::Trends => {
            let report = session
                .api()
                .generate_trends_report()
                .await
                .map_err(CoreError::from)?;
            if !global.quiet {
                eprintln!("{}", report.message);
                eprintln!("Saved to {}", report.path);
            }
            Ok(())
        }

        ReportsCommand::Data => {
            let data = session
                .api()
                .dashboard_data()
                .await
                .map_err(CoreError::from)?;
            let rendered = output::render_single(&global.output, &data, detail, |d| {
                d.total_posts.to_string()
            });
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}

fn detail(data: &DashboardData) -> String {
    let mut out = format!("Total posts: {}", data.total_posts);

    if !data.platform_distribution.is_empty() {
        let _ = write!(out, "\n\nPlatform distribution:");
        let mut platforms: Vec<_> = data.platform_distribution.iter().collect();
        platforms.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (platform, count) in platforms {
            let _ = write!(out, "\n  {platform:<12} {count}");
        }
    }

    if !data.timeline.is_empty() {
        let _ = write!(out, "\n\nTimeline:");
        for (day, count) in &data.timeline {
            let _ = write!(out, "\n  {day}  {count}");
        }
    }

    if let Some(ref updated) = data.last_updated {
        let _ = write!(out, "\n\nLast updated: {updated}");
    }
    out
}
