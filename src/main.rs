use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::LoggingSettings;
use core_types::DashboardTab;
use dashboard::{Chart, Dashboard, TabView};
use dataset::OrderRepository;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Width, in characters, of the longest bar in a text chart.
const BAR_WIDTH: u32 = 30;

/// The main entry point for the Storefront dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional: STOREFRONT__* overrides and RUST_LOG may live in a .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = init_tracing(&config.logging);

    let repository = OrderRepository::open(&config.dataset.path).with_context(|| {
        format!("Failed to load dataset from {}", config.dataset.path.display())
    })?;
    let dashboard = Dashboard::new(repository, config.dashboard.clone());
    tracing::info!(rows = dashboard.repository().len(), "Dashboard ready.");

    match cli.command {
        Commands::Report(args) => handle_report(args, &dashboard)?,
        Commands::Range => handle_range(&dashboard)?,
        Commands::Serve(args) => {
            let addr = match args.addr {
                Some(addr) => addr,
                None => config
                    .server
                    .address()
                    .parse()
                    .with_context(|| format!("Invalid server address {}", config.server.address()))?,
            };
            web_server::run_server(addr, dashboard).await?;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Reporting dashboard over an e-commerce transaction dataset.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "dashboard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one dashboard tab (or all of them) for a date range.
    Report(ReportArgs),
    /// Show the approval-date range and size of the dataset.
    Range,
    /// Serve the dashboard as a JSON API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// The tab to render. Renders every tab when omitted.
    #[arg(long, value_enum)]
    tab: Option<DashboardTab>,

    /// First approval day to include (format: YYYY-MM-DD). Defaults to the earliest approval.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last approval day to include (format: YYYY-MM-DD). Defaults to the latest approval.
    #[arg(long)]
    to: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on. Defaults to `server.host:server.port` from the config.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs, dashboard: &Dashboard) -> anyhow::Result<()> {
    let range = dashboard.resolve_range(args.from, args.to)?;
    let views = match args.tab {
        Some(tab) => vec![dashboard.render(tab, &range)],
        None => dashboard.render_all(&range),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
        OutputFormat::Table => {
            println!("{}", dashboard.settings().title);
            println!(
                "Approved between {} and {}\n",
                range.start().format("%Y-%m-%d %H:%M:%S"),
                range.end().format("%Y-%m-%d %H:%M:%S")
            );
            for view in &views {
                print_tab(view);
            }
        }
    }
    Ok(())
}

fn handle_range(dashboard: &Dashboard) -> anyhow::Result<()> {
    let repository = dashboard.repository();
    let bounds = repository
        .approval_bounds()
        .context("The dataset contains no approved orders")?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Dataset", "Value"]);
    table.add_row(vec!["Rows".to_string(), repository.len().to_string()]);
    table.add_row(vec!["First approval".to_string(), bounds.start().to_string()]);
    table.add_row(vec!["Last approval".to_string(), bounds.end().to_string()]);
    println!("{table}");
    Ok(())
}

fn print_tab(view: &TabView) {
    println!("== {} ==", view.title);
    if view.no_data {
        println!("{}\n", view.message.as_deref().unwrap_or_default());
        return;
    }

    let mut metrics = Table::new();
    metrics.load_preset(UTF8_FULL);
    metrics.set_header(vec!["Metric", "Value"]);
    for metric in &view.metrics {
        metrics.add_row(vec![metric.label.clone(), metric.value.clone()]);
    }
    println!("{metrics}");

    for chart in &view.charts {
        println!("{}", chart.title);
        println!("{}", chart_table(chart));
    }
    println!();
}

/// Draws a chart as a table of text bars; `*` marks highlighted points.
fn chart_table(chart: &Chart) -> Table {
    let max = chart
        .points
        .iter()
        .map(|p| p.value)
        .max()
        .unwrap_or(Decimal::ZERO);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", chart.x_label.as_str(), chart.y_label.as_str(), ""]);
    for point in &chart.points {
        let width = if max > Decimal::ZERO {
            (point.value * Decimal::from(BAR_WIDTH) / max)
                .round()
                .to_usize()
                .unwrap_or_default()
        } else {
            0
        };
        let marker = if point.highlight { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            point.label.clone(),
            point.value.to_string(),
            "█".repeat(width),
        ]);
    }
    table
}

/// Logs to stderr, and to a daily rolling file unless `logging.file` is off.
///
/// `RUST_LOG` takes precedence over `logging.level`. The returned guard must
/// stay alive for buffered file output to be flushed.
fn init_tracing(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    if settings.file {
        let appender = tracing_appender::rolling::daily(&settings.directory, &settings.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        None
    }
}
