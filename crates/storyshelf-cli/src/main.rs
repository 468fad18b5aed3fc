#[tokio::main]
async fn main() {
    if let Err(e) = storyshelf_cli::run(std::env::args().collect()).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
