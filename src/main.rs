//! CLI entry point for the VMMS dashboard tool.
//!
//! Provides subcommands for requesting a maintenance cost estimate, building
//! the dashboard chart set from the service (or local JSON files), and
//! summarizing a dataset.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vmms_dashboard::{
    analyzers::dashboard::{Dashboard, household_dashboard, vehicle_dashboard},
    analyzers::types::{ChartKind, FeatureImportance},
    charts::{ChartRegistry, JsonFileSurface},
    config::DashboardConfig,
    fetch::{BasicClient, HttpClient, auth::CsrfToken, fetch_bytes},
    infra::vmms::VmmsClient,
    observation::Observation,
    output::{print_json, print_pretty, write_csv, write_json},
    parser::{parse_feature_importance, parse_observations},
    prediction::{PredictionRequest, comparison_series},
    services::dashboard_api::{DashboardApi, load_feature_importance, load_sample_data},
};

#[derive(Parser)]
#[command(name = "vmms_dashboard")]
#[command(about = "Maintenance cost estimates and dashboard charts for a VMMS service", long_about = None)]
struct Cli {
    /// Base URL of the prediction service (overrides VMMS_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DatasetKind {
    Vehicle,
    Household,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a maintenance cost estimate for one vehicle
    Predict {
        #[arg(long, default_value = "Toyota")]
        make: String,
        #[arg(long, default_value_t = 2020)]
        model_year: i32,
        #[arg(long, default_value = "gas")]
        engine_type: String,
        #[arg(long, default_value_t = 45_000.0)]
        mileage: f64,
        #[arg(long, default_value = "city")]
        driving_condition: String,
        #[arg(long, default_value_t = 180)]
        service_interval: i32,
        #[arg(long, default_value_t = 60)]
        days_since_service: i32,
        #[arg(long, default_value = "Medium")]
        oil_level: String,
        #[arg(long, default_value_t = 33.5)]
        tire_pressure: f64,
        #[arg(long, default_value_t = 35.0)]
        brake_wear: f64,
        #[arg(long, default_value_t = 2)]
        fault_codes: i32,

        /// Directory to write the comparison chart to
        #[arg(long, default_value = "charts")]
        chart_dir: PathBuf,
    },
    /// Build every dashboard chart and write them as JSON documents
    Charts {
        /// Which chart set to build
        #[arg(long, value_enum, default_value_t = DatasetKind::Vehicle)]
        dataset: DatasetKind,

        /// Observation JSON file or URL (default: the service's sample data)
        #[arg(long, value_name = "FILE_OR_URL")]
        data: Option<String>,

        /// Feature-importance JSON file or URL (default: the service's endpoint)
        #[arg(long, value_name = "FILE_OR_URL")]
        importance: Option<String>,

        /// Directory to write chart documents to
        #[arg(short, long, default_value = "charts")]
        output_dir: PathBuf,

        /// Optional: also export every series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Gzip-compress the CSV export
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Optional: also write the whole dashboard (summary and charts) to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Cost bin width in dollars (overrides VMMS_BIN_WIDTH)
        #[arg(long)]
        bin_width: Option<f64>,
    },
    /// Log descriptive statistics and the full chart set as JSON
    Summary {
        /// Which chart set to build
        #[arg(long, value_enum, default_value_t = DatasetKind::Vehicle)]
        dataset: DatasetKind,

        /// Observation JSON file or URL (default: the service's sample data)
        #[arg(long, value_name = "FILE_OR_URL")]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let mut config = DashboardConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vmms_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("RUST_LOG")
                .from_env_lossy(),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .with_env_var("RUST_LOG_JSON")
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    match cli.command {
        Commands::Predict {
            make,
            model_year,
            engine_type,
            mileage,
            driving_condition,
            service_interval,
            days_since_service,
            oil_level,
            tire_pressure,
            brake_wear,
            fault_codes,
            chart_dir,
        } => {
            let request = PredictionRequest {
                make,
                model_year,
                engine_type,
                mileage,
                driving_condition,
                service_interval,
                days_since_service,
                oil_level,
                tire_pressure,
                brake_wear,
                fault_codes,
            };
            predict(&config, &request, &chart_dir).await?;
        }
        Commands::Charts {
            dataset,
            data,
            importance,
            output_dir,
            csv,
            gzip,
            json,
            bin_width,
        } => {
            if let Some(width) = bin_width {
                config.settings.cost_bin_width = width;
            }
            let dashboard = build_dashboard(&config, dataset, data, importance).await?;

            let mut registry = ChartRegistry::new(JsonFileSurface::new(&output_dir)?);
            dashboard.publish(&mut registry)?;
            info!(output_dir = %output_dir.display(), charts = registry.len(), "Charts written");

            if let Some(path) = csv {
                write_csv(&path, &dashboard, gzip)?;
                info!(path = %path.display(), gzip, "CSV export written");
            }
            if let Some(path) = json {
                write_json(&path, &dashboard)?;
                info!(path = %path.display(), "JSON export written");
            }
        }
        Commands::Summary { dataset, data } => {
            let dashboard = build_dashboard(&config, dataset, data, None).await?;
            print_pretty(&dashboard);
            print_json(&dashboard)?;
        }
    }

    Ok(())
}

/// Builds the service client, attaching the CSRF token when one is configured.
fn api_client(config: &DashboardConfig) -> Result<VmmsClient<Box<dyn HttpClient>>> {
    let basic = BasicClient::new(config.http_timeout)?;
    let http: Box<dyn HttpClient> = match &config.csrf_token {
        Some(token) => Box::new(CsrfToken::new(basic, token)?),
        None => Box::new(basic),
    };
    Ok(VmmsClient::new(&config.base_url, http))
}

/// Validates and submits a prediction, then redraws the comparison chart.
#[tracing::instrument(skip(config, request), fields(make = %request.make))]
async fn predict(config: &DashboardConfig, request: &PredictionRequest, chart_dir: &Path) -> Result<()> {
    request.validate()?;
    if config.csrf_token.is_none() {
        warn!("No CSRF token configured; the service will likely reject the request");
    }

    let client = api_client(config)?;
    let response = match client.predict(request).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Error generating estimate");
            return Err(e.context("Error generating estimate. Please try again."));
        }
    };

    info!(
        predicted_cost = response.predicted_cost,
        category = %response.category(),
        "Estimated maintenance cost"
    );
    for factor in request.key_factors() {
        info!(factor = %factor, "Key factor");
    }

    let mut registry = ChartRegistry::new(JsonFileSurface::new(chart_dir)?);
    registry.replace(
        "prediction-chart",
        ChartKind::Bar,
        &comparison_series(response.predicted_cost),
    )?;
    Ok(())
}

/// Loads the inputs (concurrently, each failing soft) and builds the chart set.
#[tracing::instrument(skip(config, data, importance))]
async fn build_dashboard(
    config: &DashboardConfig,
    dataset: DatasetKind,
    data: Option<String>,
    importance: Option<String>,
) -> Result<Dashboard> {
    let client = api_client(config)?;

    let load_data = async {
        match &data {
            Some(source) => load_local(config, source, parse_observations).await,
            None => load_sample_data(&client).await,
        }
    };
    let load_importance = async {
        match (&importance, dataset) {
            (_, DatasetKind::Household) => Vec::new(),
            (Some(source), _) => load_local(config, source, parse_feature_importance).await,
            (None, _) => load_feature_importance(&client).await,
        }
    };
    let (observations, importances): (Vec<Observation>, Vec<FeatureImportance>) =
        tokio::join!(load_data, load_importance);

    info!(
        observations = observations.len(),
        features = importances.len(),
        "Inputs loaded"
    );

    let dashboard = match dataset {
        DatasetKind::Vehicle => vehicle_dashboard(&observations, &importances, &config.settings)?,
        DatasetKind::Household => household_dashboard(&observations, &config.settings)?,
    };
    info!(
        count = dashboard.summary.count,
        mean = dashboard.summary.mean,
        "Outcome summary"
    );
    Ok(dashboard)
}

/// Loads a JSON file or URL and decodes it, degrading to empty on failure.
async fn load_local<T>(
    config: &DashboardConfig,
    source: &str,
    parse: fn(&[u8]) -> Result<Vec<T>>,
) -> Vec<T> {
    let decoded = fetcher(config, source).await.and_then(|bytes| parse(&bytes));
    match decoded {
        Ok(rows) => rows,
        Err(e) => {
            error!(source, error = %e, "Failed to load input");
            Vec::new()
        }
    }
}

/// Loads bytes from a local file path or fetches them over HTTP.
#[tracing::instrument(skip_all, fields(source = %source))]
async fn fetcher(config: &DashboardConfig, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new(config.http_timeout)?;
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source).with_context(|| format!("reading {source}"))?
    };
    Ok(bytes)
}
