//! Styled terminal output.

use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use storyshelf::catalog::{Comment, Story};
use storyshelf::listing::{Page, PageLink, page_window};
use storyshelf::markdown::{self, Inline};

pub fn print_header(title: &str) {
    println!();
    println!("{}", "─".repeat(70).bright_black());
    println!("{}", title.bold().cyan());
    println!("{}", "─".repeat(70).bright_black());
}

pub fn print_info(msg: &str) {
    println!("  {} {}", "ℹ".blue(), msg);
}

pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠".yellow().bold(), msg);
}

fn header_cell(title: &str) -> Cell {
    Cell::new(title)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

pub fn stories_table(stories: &[Story], offset: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell("#"),
            header_cell("Title"),
            header_cell("Slug"),
            header_cell("Date"),
            header_cell("Likes"),
            header_cell("Views"),
        ]);

    for (i, story) in stories.iter().enumerate() {
        table.add_row(vec![
            Cell::new(offset + i + 1),
            Cell::new(&story.title).add_attribute(Attribute::Bold),
            Cell::new(&story.slug).fg(Color::DarkGrey),
            Cell::new(story.story_date.as_deref().unwrap_or("-")),
            Cell::new(story.likes_count).fg(Color::Red),
            Cell::new(story.views_count),
        ]);
    }

    table
}

/// `‹ 1 … 4 [5] 6 … 10 ›`, with arrows only where a neighbour page exists.
pub fn page_strip<T>(page: &Page<T>) -> String {
    let mut parts = Vec::new();
    if page.has_prev() {
        parts.push("‹".to_string());
    }
    for link in page_window(page.page, page.total_pages) {
        parts.push(match link {
            PageLink::Number(n) if n == page.page => format!("[{n}]"),
            PageLink::Number(n) => n.to_string(),
            PageLink::Gap => "…".to_string(),
        });
    }
    if page.has_next() {
        parts.push("›".to_string());
    }
    parts.join(" ")
}

pub fn print_page_strip<T>(page: &Page<T>) {
    if page.total_pages > 1 {
        println!();
        println!("  {}", page_strip(page).bright_black());
    }
}

/// Story body with bold and italic runs styled for the terminal.
pub fn render_markdown(content: &str) -> String {
    markdown::parse(content)
        .into_iter()
        .map(|paragraph| {
            paragraph
                .into_iter()
                .map(|inline| match inline {
                    Inline::Text(t) => t,
                    Inline::Bold(t) => t.bold().to_string(),
                    Inline::Italic(t) => t.italic().to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn print_comment(comment: &Comment) {
    println!(
        "  {} {}",
        comment.author_name.bold(),
        comment
            .created_at
            .format("%d.%m.%Y %H:%M")
            .to_string()
            .bright_black()
    );
    for line in comment.content.lines() {
        println!("    {line}");
    }
}
