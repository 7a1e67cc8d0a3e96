mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::run::RunArgs;

#[derive(Debug, Parser)]
#[command(name = "mlstock-cli")]
#[command(about = "Daily marketplace stock audit into monthly workbooks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve stock for every listing and record today's column
    Run(RunArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mlstock_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = match cli.command {
        Some(Commands::Run(args)) => args,
        None => RunArgs::default(),
    };

    let path = run::run_audit(config, &args).await?;
    if let Some(path) = path {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests;
