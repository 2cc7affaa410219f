mod auth;
mod cli;
mod error;
mod model;
mod probe;
mod session;

use anyhow::Context;
use clap::Parser;
use cli::CliArgs;

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let session_config = args.session_config()?;
    let session = session::HttpSession::new(&session_config)?;

    let detection = probe::detect_flavor(&session).await?;
    println!("{}", serde_json::to_string(&detection)?);

    if args.detect_only {
        return Ok(());
    }

    let result = probe::whoami(&session, &detection.base_url, detection.flavor)
        .await
        .with_context(|| format!("probing {} API", detection.flavor))?;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let dotenv = cli::load_dotenv();
    init_tracing();
    cli::log_dotenv(&dotenv);
    let args = CliArgs::parse();

    if let Err(error) = run(args).await {
        tracing::error!("{error:#}");
        std::process::exit(1);
    }
}
