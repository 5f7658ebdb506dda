//! @ai:module:intent CLI for renewable-energy analytics stores and reports
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use energy_analytics::{
    analytics::{PortfolioAggregator, PortfolioAggregatorTrait, PortfolioOverview},
    config::{AppConfig, ExportFormat},
    fetcher::{HttpSeriesFetcher, MockSeriesFetcher, SeriesFetcherTrait},
    report::{sink_for, PlottersChartRenderer, ReportBranding, ReportComposer, ReportPipeline},
    resource::ResourceTypeRegistry,
    series::PeriodRange,
    store::{CommitOutcome, StoreSet},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CONFIG_FILE: &str = "energy-analytics.toml";

#[derive(Parser)]
#[command(name = "energy-analytics")]
#[command(about = "Per-resource production analytics and report export for renewable energy")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the production-data endpoint base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Do not contact the endpoint; every store uses simulated data
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered resource types
    List,

    /// Fetch one resource type and print its state as JSON
    Fetch {
        /// Resource type key (e.g. solar, wind)
        #[arg(short, long)]
        resource: String,

        /// First year of the range
        #[arg(long)]
        start: Option<i32>,

        /// Last year of the range
        #[arg(long)]
        end: Option<i32>,
    },

    /// Fetch one resource type and export its summary report
    Report {
        /// Resource type key (e.g. solar, wind)
        #[arg(short, long)]
        resource: String,

        /// First year of the range
        #[arg(long)]
        start: Option<i32>,

        /// Last year of the range
        #[arg(long)]
        end: Option<i32>,

        /// Export format
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Output directory for the report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace the chart with a textual value summary
        #[arg(long)]
        no_chart: bool,
    },

    /// Fetch every resource type and print a combined overview
    Overview {
        /// First year of the range
        #[arg(long)]
        start: Option<i32>,

        /// Last year of the range
        #[arg(long)]
        end: Option<i32>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("energy_analytics=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = load_or_default_config(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    if cli.offline {
        tracing::info!("Offline mode: all stores will use simulated data");
        let fetcher = Arc::new(MockSeriesFetcher::failing("offline mode"));
        dispatch(cli.command, &config, fetcher).await
    } else {
        let fetcher = Arc::new(HttpSeriesFetcher::new(&config.api)?);
        dispatch(cli.command, &config, fetcher).await
    }
}

/// @ai:intent Route a command to its handler with the chosen fetcher
/// @ai:effects network, fs:write
async fn dispatch<F: SeriesFetcherTrait>(
    command: Commands,
    config: &AppConfig,
    fetcher: Arc<F>,
) -> Result<()> {
    match command {
        Commands::List => list_resources(),
        Commands::Fetch {
            resource,
            start,
            end,
        } => fetch_state(config, fetcher, &resource, start, end).await,
        Commands::Report {
            resource,
            start,
            end,
            format,
            output,
            no_chart,
        } => {
            export_report(
                config,
                fetcher,
                ReportArgs {
                    resource,
                    start,
                    end,
                    format,
                    output,
                    no_chart,
                },
            )
            .await
        }
        Commands::Overview { start, end } => print_overview(config, fetcher, start, end).await,
        Commands::Init { output } => init_config(&AppConfig::default(), &output),
    }
}

struct ReportArgs {
    resource: String,
    start: Option<i32>,
    end: Option<i32>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
    no_chart: bool,
}

/// @ai:intent Resolve CLI years against the configured default range
/// @ai:effects pure
fn resolve_range(config: &AppConfig, start: Option<i32>, end: Option<i32>) -> Result<PeriodRange> {
    let range = PeriodRange::new(
        start.unwrap_or(config.range.start),
        end.unwrap_or(config.range.end),
    )?;
    Ok(range)
}

/// @ai:intent Print registered resource types
/// @ai:effects io
fn list_resources() -> Result<()> {
    let registry = ResourceTypeRegistry::new();

    println!("{:<12} {:<10} {:<30} {:<8}", "Key", "Color", "Endpoint", "Unit");
    println!("{}", "-".repeat(64));

    for config in registry.iter() {
        println!(
            "{:<12} {:<10} {:<30} {:<8}",
            config.key(),
            config.display_color.hex(),
            config.endpoint_path,
            config.unit
        );
    }

    Ok(())
}

/// @ai:intent Initialize one store and print its state
/// @ai:effects network, io
async fn fetch_state<F: SeriesFetcherTrait>(
    config: &AppConfig,
    fetcher: Arc<F>,
    resource: &str,
    start: Option<i32>,
    end: Option<i32>,
) -> Result<()> {
    let range = resolve_range(config, start, end)?;
    let mut stores = StoreSet::new(ResourceTypeRegistry::new(), fetcher, range);
    let store = stores.get_or_create(resource)?;

    store.initialize().await;

    println!("{}", serde_json::to_string_pretty(&store.get_state())?);
    Ok(())
}

/// @ai:intent Initialize one store and export its report
/// @ai:effects network, fs:write
async fn export_report<F: SeriesFetcherTrait>(
    config: &AppConfig,
    fetcher: Arc<F>,
    args: ReportArgs,
) -> Result<()> {
    let range = resolve_range(config, args.start, args.end)?;
    let mut stores = StoreSet::new(ResourceTypeRegistry::new(), fetcher, range);
    let store = stores.get_or_create(&args.resource)?;

    let outcome = store.initialize().await;

    let composer = ReportComposer::new(ReportBranding::from(&config.report));
    let sink = sink_for(args.format.unwrap_or(config.report.format));
    let output_dir = args
        .output
        .unwrap_or_else(|| config.report.output_dir.clone());

    let path = if args.no_chart {
        ReportPipeline::<PlottersChartRenderer>::without_chart(composer)
            .export(store.as_ref(), sink.as_ref(), &output_dir)
            .await?
    } else {
        ReportPipeline::new(composer, PlottersChartRenderer::new())
            .export(store.as_ref(), sink.as_ref(), &output_dir)
            .await?
    };

    println!("Report written to {}", path.display());
    if outcome == CommitOutcome::Degraded {
        println!("Live data was unavailable; the report contains simulated values.");
    }
    Ok(())
}

/// @ai:intent Initialize every store and print the combined overview
/// @ai:effects network, io
async fn print_overview<F: SeriesFetcherTrait>(
    config: &AppConfig,
    fetcher: Arc<F>,
    start: Option<i32>,
    end: Option<i32>,
) -> Result<()> {
    let range = resolve_range(config, start, end)?;
    let mut stores = StoreSet::new(ResourceTypeRegistry::new(), fetcher, range);
    stores.create_all()?;
    stores.initialize_all().await;

    let snapshots: Vec<_> = stores
        .iter()
        .map(|store| (store.resource(), store.get_state()))
        .collect();
    let overview = PortfolioAggregator::new().aggregate(&snapshots);

    print_portfolio(&overview, range);
    Ok(())
}

/// @ai:intent Print the portfolio overview table
/// @ai:effects io
fn print_portfolio(overview: &PortfolioOverview, range: PeriodRange) {
    println!();
    println!("Renewable Production Overview {}", range);
    println!("==================================");
    println!();

    println!(
        "{:<12} {:<10} {:>14} {:>8} {:>10}",
        "Resource", "Status", "Projection", "Share", "Growth"
    );
    println!("{}", "-".repeat(58));

    for entry in &overview.resources {
        let projection = entry
            .projection
            .map(|value| format!("{:.2}", value))
            .unwrap_or_else(|| "n/a".to_string());
        let share = entry
            .share
            .map(|value| format!("{:.1}%", value))
            .unwrap_or_else(|| "n/a".to_string());
        let growth = entry
            .summary
            .as_ref()
            .and_then(|summary| summary.growth_rate)
            .map(|rate| format!("{:+.1}%", rate))
            .unwrap_or_else(|| "n/a".to_string());

        println!(
            "{:<12} {:<10} {:>14} {:>8} {:>10}",
            entry.resource.as_str(),
            entry.status.as_str(),
            projection,
            share,
            growth
        );
    }

    println!("{}", "-".repeat(58));
    println!("{:<23} {:>14.2}", "Combined projection:", overview.combined_projection);

    if let Some(leader) = overview.leader() {
        println!("Largest contributor: {}", leader.resource);
    }

    if overview.has_simulated_data() {
        println!();
        println!(
            "Warning: {} resource(s) are showing simulated data.",
            overview.degraded_count
        );
    }
    println!();
}

/// @ai:intent Write a default configuration file
/// @ai:effects fs:write
fn init_config(config: &AppConfig, output: &Path) -> Result<()> {
    config.save(output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => AppConfig::load(p),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                AppConfig::load(default_path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}
