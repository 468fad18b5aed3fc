mod cli;
mod commands;
mod output;

use storyshelf::{RestClient, StoryStore};
use tracing_subscriber::EnvFilter;

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    if let cli::Command::Help(topic) = cmd {
        cli::print_help(topic);
        return Ok(());
    }

    dotenvy::dotenv().ok();
    init_tracing();
    let store = StoryStore::new(RestClient::from_env());

    match cmd {
        cli::Command::Help(_) => Ok(()),
        cli::Command::List(args) => commands::list(&store, args).await,
        cli::Command::Archive(args) => commands::archive(&store, args).await,
        cli::Command::Show(args) => commands::show(&store, args).await,
        cli::Command::Like(args) => commands::like(&store, args).await,
        cli::Command::Comments(args) => commands::comments(&store, args).await,
        cli::Command::DeleteComment(args) => commands::delete_comment(&store, args).await,
    }
}

fn init_tracing() {
    // Logs go to stderr so they never mix with rendered output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
