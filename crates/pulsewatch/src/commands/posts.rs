//! Post browsing command handlers.

use tabled::Tabled;

use pulsewatch_api::models::{Post, PostFilter, PostsPage};
use pulsewatch_core::{CoreError, Session, posts};

use crate::cli::{GlobalOpts, PostsArgs, PostsCommand, PostsListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "PLATFORM")]
    platform: String,
    #[tabled(rename = "TYPE")]
    post_type: String,
    #[tabled(rename = "AUTHOR")]
    author: String,
    #[tabled(rename = "LIKES")]
    likes: u64,
    #[tabled(rename = "TEXT")]
    text: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            platform: post.platform.clone(),
            post_type: post.post_type.clone(),
            author: post.author.clone().unwrap_or_default(),
            likes: post.likes,
            text: output::truncate(post.text.as_deref().unwrap_or(""), 60),
        }
    }
}

pub async fn handle(
    session: &Session,
    args: PostsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PostsCommand::List(list_args) => list(session, &list_args, global).await,
        PostsCommand::Recent { days, limit } => recent(session, days, limit, global).await,
    }
}

async fn list(session: &Session, args: &PostsListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let filter = build_filter(args)?;
    let mut sub = session.posts().list(&filter);
    let snap = util::settle(&mut sub).await?;

    let page = snap
        .data
        .as_deref()
        .and_then(pulsewatch_core::QueryData::as_posts)
        .ok_or_else(|| CliError::Query {
            message: "posts query resolved without a page".into(),
        })?;

    print_page(page, global);

    if !global.quiet {
        let shown_from = page.offset + 1;
        let shown_to = u64::from(page.offset) + page.posts.len() as u64;
        eprintln!("Showing {shown_from}-{shown_to} of {}", page.total);
        if posts::has_next(filter.offset, filter.limit, page.total) {
            let next = filter.offset + filter.limit;
            eprintln!("Next page: --offset {next}");
        }
    }
    Ok(())
}

async fn recent(
    session: &Session,
    days: u32,
    limit: u32,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = session
        .api()
        .recent_posts(days, limit)
        .await
        .map_err(CoreError::from)?;
    print_page(&page, global);
    Ok(())
}

fn build_filter(args: &PostsListArgs) -> Result<PostFilter, CliError> {
    if args.limit == 0 || args.limit > posts::MAX_PAGE_SIZE {
        return Err(CliError::Validation {
            field: "limit".into(),
            reason: format!("must be between 1 and {}", posts::MAX_PAGE_SIZE),
        });
    }
    Ok(PostFilter {
        platform: args.platform.clone(),
        post_type: args.post_type.clone(),
        author: args.author.clone(),
        limit: args.limit,
        offset: args.offset,
    })
}

fn print_page(page: &PostsPage, global: &GlobalOpts) {
    let rendered = output::render_list(
        &global.output,
        &page.posts,
        |post| PostRow::from(post),
        |post| post.id.clone(),
    );
    output::print_output(&rendered, global.quiet);
}
