use clap::Parser;
use pdfmerge::cli::Cli;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = pdfmerge::run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
