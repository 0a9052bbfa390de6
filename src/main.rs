use clap::Parser;
use exmo_indicator::cli::{print_currencies, Cli, Commands};
use exmo_indicator::config::Config;
use exmo_indicator::exchange::ExmoClient;
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    exmo_indicator::telemetry::init_telemetry(&config.telemetry)?;

    let client = ExmoClient::with_config(config.exchange.client_config())?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Indicators(args) => {
            args.execute(client, &config.indicator, &mut stdout).await?;
        }
        Commands::Ticker(args) => {
            args.execute(&client, &mut stdout).await?;
        }
        Commands::OrderBook(args) => {
            args.execute(&client, &mut stdout).await?;
        }
        Commands::Trades(args) => {
            args.execute(&client, &mut stdout).await?;
        }
        Commands::Currencies => {
            print_currencies(&client, &mut stdout).await?;
        }
        Commands::Candles(args) => {
            args.execute(&client, &mut stdout).await?;
        }
        Commands::Config => {
            writeln!(stdout, "Current configuration:")?;
            writeln!(stdout, "  Exchange: {}", config.exchange.base_url)?;
            match config.exchange.timeout_secs {
                Some(secs) => writeln!(stdout, "  Timeout: {}s", secs)?,
                None => writeln!(stdout, "  Timeout: none")?,
            }
            writeln!(
                stdout,
                "  Indicator: {} resolution={}m period={} lookback={}d",
                config.indicator.pair,
                config.indicator.resolution,
                config.indicator.period,
                config.indicator.lookback_days
            )?;
            writeln!(
                stdout,
                "  Logging: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            )?;
        }
    }

    Ok(())
}
