use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transit_billing::application::engine::BillingEngine;
use transit_billing::application::ordering::OrderingPolicy;
use transit_billing::application::sharded::ShardedBilling;
use transit_billing::config::BillingConfig;
use transit_billing::domain::fare::Fare;
use transit_billing::interfaces::csv::tap_reader::TapReader;
use transit_billing::interfaces::csv::totals_writer::TotalsWriter;
use transit_billing::interfaces::csv::zone_map_reader::ZoneMapReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Station zone map CSV file (station,zone)
    zone_map: PathBuf,

    /// Tap records CSV file (user_id,direction,station,timestamp)
    journey_data: PathBuf,

    /// Output CSV file. Totals are written to stdout when omitted.
    output: Option<PathBuf>,

    /// TOML file with fare, cap and ordering settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// How to treat taps that arrive out of temporal order
    #[arg(long, value_enum)]
    ordering: Option<OrderingPolicy>,

    /// Number of parallel billing shards. Users are partitioned across them.
    #[arg(long, default_value_t = 1)]
    shards: usize,

    /// Override the daily cap
    #[arg(long)]
    daily_cap: Option<Decimal>,

    /// Override the monthly cap
    #[arg(long)]
    monthly_cap: Option<Decimal>,
}

impl Cli {
    fn billing_config(&self) -> Result<BillingConfig> {
        let mut config = match &self.config {
            Some(path) => BillingConfig::from_file(path).into_diagnostic()?,
            None => BillingConfig::default(),
        };
        if let Some(ordering) = self.ordering {
            config.ordering = ordering;
        }
        if let Some(daily) = self.daily_cap {
            config.caps.daily = Fare::new(daily);
        }
        if let Some(monthly) = self.monthly_cap {
            config.caps.monthly = Fare::new(monthly);
        }
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.billing_config()?;

    let zone_map = File::open(&cli.zone_map).into_diagnostic()?;
    let catalog = Arc::new(ZoneMapReader::new(zone_map).load().into_diagnostic()?);

    let journey_data = File::open(&cli.journey_data).into_diagnostic()?;
    let taps = TapReader::new(journey_data).taps();

    let summary = if cli.shards > 1 {
        ShardedBilling::run(catalog, &config, cli.shards, taps)
            .await
            .into_diagnostic()?
    } else {
        BillingEngine::run(catalog, &config, taps).into_diagnostic()?
    };

    match &cli.output {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            TotalsWriter::new(file)
                .write_totals(&summary.totals)
                .into_diagnostic()?;
            info!(output = %path.display(), users = summary.totals.len(), "Totals written");
            eprintln!("Billing calculation complete. Results saved to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            TotalsWriter::new(stdout.lock())
                .write_totals(&summary.totals)
                .into_diagnostic()?;
            eprintln!("Billing calculation complete");
        }
    }

    Ok(())
}
