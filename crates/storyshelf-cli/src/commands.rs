use crate::cli::{AdminArgs, ArchiveArgs, DeleteCommentArgs, LikeArgs, ListArgs, ShowArgs};
use crate::output;
use chrono::{Datelike, Local};
use colored::Colorize;
use storyshelf::catalog::{AdminConsole, ENV_ADMIN_SECRET, new_user_identifier};
use storyshelf::listing::{
    ARCHIVE_PER_PAGE, HOME_PER_PAGE, archive_page, group_by_year, paginate, sort_stories,
};
use storyshelf::{AdminGate, RestError, StoryStore};

pub async fn list(store: &StoryStore, args: ListArgs) -> anyhow::Result<()> {
    let mut stories = store.published_stories(args.search.as_deref()).await?;
    sort_stories(&mut stories, args.sort, Local::now().date_naive());

    let page = paginate(&stories, args.page, HOME_PER_PAGE);
    match args.search.as_deref() {
        Some(term) => output::print_header(&format!("Stories matching \"{term}\"")),
        None => output::print_header(&format!("Stories by {}", args.sort.as_param())),
    }

    if page.items.is_empty() {
        if page.total_items == 0 {
            output::print_warning("no stories found");
        } else {
            output::print_warning(&format!(
                "page {} is past the end ({} pages)",
                page.page, page.total_pages
            ));
        }
        return Ok(());
    }

    let offset = (page.page - 1) * HOME_PER_PAGE;
    println!("{}", output::stories_table(&page.items, offset));
    output::print_page_strip(&page);
    Ok(())
}

pub async fn archive(store: &StoryStore, args: ArchiveArgs) -> anyhow::Result<()> {
    let stories = store.archive(!args.descending).await?;
    let groups = group_by_year(&stories, args.descending, Local::now().year());
    let page = archive_page(&groups, args.page, ARCHIVE_PER_PAGE);

    output::print_header("Archive");
    if page.items.is_empty() {
        output::print_warning("no stories on this page");
        return Ok(());
    }

    for group in &page.items {
        println!();
        println!("{}", group.year.to_string().bold().cyan());
        for entry in &group.entries {
            println!(
                "  {:>3}. {}  {}",
                entry.index,
                entry.story.title,
                entry.story.slug.bright_black()
            );
        }
    }
    output::print_page_strip(&page);
    Ok(())
}

pub async fn show(store: &StoryStore, args: ShowArgs) -> anyhow::Result<()> {
    let Some(story) = store.story_by_slug(&args.slug).await? else {
        anyhow::bail!("story not found: {}", args.slug);
    };

    let views = match store.record_view(&story).await {
        Ok(views) => views,
        Err(err) => {
            tracing::warn!(slug = %story.slug, error = %err, "failed to record view");
            story.views_count
        }
    };

    output::print_header(&story.title);
    println!("{}", story.description.italic());
    if let Some(date) = &story.story_date {
        output::print_info(date);
    }
    output::print_info(&format!("♥ {}  ◉ {}", story.likes_count, views));
    println!();
    println!("{}", output::render_markdown(&story.content));

    let comments = store.comments_for(story.id).await?;
    output::print_header(&format!("Comments ({})", comments.len()));
    for comment in &comments {
        output::print_comment(comment);
    }
    Ok(())
}

pub async fn like(store: &StoryStore, args: LikeArgs) -> anyhow::Result<()> {
    let Some(story) = store.story_by_slug(&args.slug).await? else {
        anyhow::bail!("story not found: {}", args.slug);
    };

    let user = match args.user {
        Some(user) => user,
        None => {
            let user = new_user_identifier();
            output::print_info(&format!("reading as {user} (pass --as {user} to reuse)"));
            user
        }
    };

    if store.toggle_like(story.id, &user).await? {
        println!("  {} {}", "♥".red().bold(), story.title);
    } else {
        println!("  {} {}", "♡".bright_black(), story.title);
    }
    Ok(())
}

fn unlock(store: &StoryStore, password: &str) -> anyhow::Result<AdminConsole> {
    let Some(gate) = AdminGate::from_env() else {
        anyhow::bail!("admin commands are disabled: {ENV_ADMIN_SECRET} is not set");
    };
    match gate.unlock(password, store.client().clone()) {
        Ok(console) => Ok(console),
        Err(RestError::Unauthorized) => anyhow::bail!("wrong admin password"),
        Err(err) => Err(err.into()),
    }
}

pub async fn comments(store: &StoryStore, args: AdminArgs) -> anyhow::Result<()> {
    let console = unlock(store, &args.password)?;
    let comments = console.all_comments().await?;

    output::print_header(&format!("All comments ({})", comments.len()));
    for comment in &comments {
        output::print_comment(comment);
        println!("    {}", comment.id.to_string().bright_black());
    }
    Ok(())
}

pub async fn delete_comment(store: &StoryStore, args: DeleteCommentArgs) -> anyhow::Result<()> {
    let console = unlock(store, &args.password)?;
    console.delete_comment(args.id).await?;
    output::print_info(&format!("comment {} deleted", args.id));
    Ok(())
}
