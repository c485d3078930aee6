use clap::Parser;
use movescan::cli::{Cli, Commands};
use movescan::config::Config;
use movescan::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    telemetry::init_logging(&config.telemetry.log_level)?;

    match cli.command {
        Commands::Scan(args) => {
            telemetry::init_metrics(config.telemetry.metrics_port)?;
            args.execute(&config).await?;
        }
        Commands::Reference(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Feed: {} ({})",
                config.feed.gateway_url, config.feed.dataset
            );
            println!(
                "  Reference: {} ({})",
                config.reference.base_url, config.reference.dataset
            );
            println!("  Threshold: {}", config.scanner.threshold);
            println!("  Metrics port: {}", config.telemetry.metrics_port);
        }
    }

    Ok(())
}
