use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use finchat::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "finchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Root URL of the financial agent service [env: FINCHAT_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds (must be > 0); requests wait indefinitely when unset [env: FINCHAT_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Answer from a canned in-process agent instead of the network
    #[arg(long, global = true)]
    mock_agent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // Logs go to stderr so replies on stdout stay pipeable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        mock_agent: cli.mock_agent,
    })?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
