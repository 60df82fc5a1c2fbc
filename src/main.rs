use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = plugchain::cli::Cli::parse();
    if let Err(e) = plugchain::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
