use clap::Parser;
use dotenv::dotenv;
use job_dashboard::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args = cli::Args::parse();

    // Logs go to stderr so rendered tables stay clean on stdout.
    let level = args.log_level.clone().unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::dispatch(args).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
