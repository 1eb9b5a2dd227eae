//! github-signer - push signed commits through GitHub's commit API
//!
//! CLI binary. No signing key is held locally: the commit is created and
//! signed server-side by GitHub.

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

/// Command-line options
#[derive(Parser)]
#[command(name = "github-signer")]
#[command(about = "Push signed commits to GitHub via the server-side commit API")]
#[command(version)]
struct Cli {
    /// The repository to push commits to, as owner/name
    #[arg(short, long)]
    repository: String,

    /// The branch to push commits to
    #[arg(short, long)]
    branch: String,

    /// The commit message to use
    #[arg(short, long, default_value = "updated with github-signer")]
    message: String,

    /// Automatically raise a pull request if set
    #[arg(short = 'p', long = "prmake")]
    pull_request: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits 2 on parse failures; this tool reserves 1
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let result = cli::run_push(
        &cli.repository,
        &cli.branch,
        &cli.message,
        cli.pull_request,
    )
    .await;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
