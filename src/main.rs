//! CLI entry point for the survey insights tool.
//!
//! Provides subcommands for rendering the analytics dashboard, exporting
//! filtered responses, submitting a survey and listing customers.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use survey_insights::analyzers::{Period, ResponseFilter, analyze_filtered};
use survey_insights::config::Settings;
use survey_insights::fetch::auth::ApiKey;
use survey_insights::fetch::{BasicClient, HttpClient};
use survey_insights::infra::survey::{FileSource, SurveyApi};
use survey_insights::model::SurveyDraft;
use survey_insights::output::{
    ExportFormat, default_export_name, print_json, print_pretty, render_summary, write_export,
};
use survey_insights::services::{ResponseSource, SurveySubmitter};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "survey_insights")]
#[command(about = "Customer satisfaction survey analytics", long_about = None)]
struct Cli {
    /// Optional JSON settings file; environment variables are used otherwise
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate responses and print the dashboard summary
    Report {
        /// JSON file or survey API base URL (defaults to SURVEY_API_URL)
        #[arg(short, long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Branch to report on, or "all"
        #[arg(short, long, default_value = "all")]
        location: String,

        /// all, last30, last90 or last180
        #[arg(short, long, default_value = "all")]
        period: String,

        /// Log the full report as JSON instead of the text summary
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Override the configured response rate
        #[arg(long)]
        response_rate: Option<f64>,
    },
    /// Export filtered responses as CSV or TSV
    Export {
        #[arg(short, long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        #[arg(short, long, default_value = "all")]
        location: String,

        #[arg(short, long, default_value = "all")]
        period: String,

        /// Only keep responses whose name, location or comments contain this text
        #[arg(long)]
        search: Option<String>,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output path (defaults to survey-responses-<date>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Gzip compress the export
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Submit a survey response to the backend
    Submit {
        #[arg(long)]
        customer_name: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        food_quality: String,
        #[arg(long)]
        service_speed: String,
        #[arg(long)]
        staff_friendliness: String,
        #[arg(long)]
        cleanliness: String,
        #[arg(long)]
        value_for_money: String,
        #[arg(long)]
        ambiance: String,
        #[arg(long)]
        overall_rating: f64,
        #[arg(long)]
        comments: Option<String>,
    },
    /// List customers with a per-location count
    Customers {
        #[arg(short, long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Customer export to read instead of deriving customers from a response file
        #[arg(long, value_name = "FILE", requires = "source")]
        customers: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::from_env()?,
    };

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = Path::new(&settings.log_file_path);
    let log_dir = log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("survey_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let result = run(cli.command, &settings).await;
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

async fn run(command: Commands, settings: &Settings) -> Result<()> {
    let today = Utc::now().date_naive();

    match command {
        Commands::Report {
            source,
            location,
            period,
            json,
            response_rate,
        } => {
            let period: Period = period.parse()?;
            let source = response_source(source.as_deref(), settings)?;
            let responses = source
                .fetch_responses()
                .await
                .context("error loading survey data")?;

            let filter = ResponseFilter::new(&location, period);
            let rate = response_rate.unwrap_or(settings.response_rate);
            let report = analyze_filtered(&responses, &filter, today, rate);

            print_pretty(&report);
            if json {
                print_json(&report)?;
            } else {
                println!("{}", render_summary(&report));
            }
        }
        Commands::Export {
            source,
            location,
            period,
            search,
            format,
            output,
            gzip,
        } => {
            let period: Period = period.parse()?;
            let source = response_source(source.as_deref(), settings)?;
            let responses = source
                .fetch_responses()
                .await
                .context("error loading survey data")?;

            let mut filter = ResponseFilter::new(&location, period);
            if let Some(term) = search.as_deref() {
                filter = filter.with_search(term);
            }
            let filtered = filter.apply(&responses, today);
            if filtered.is_empty() {
                warn!("No responses match the selected filters; exporting headers only");
            }

            let path = output
                .unwrap_or_else(|| PathBuf::from(default_export_name(format, today, gzip)));
            let rows = write_export(&path, filtered, format, gzip)?;
            info!(rows, path = %path.display(), "Survey responses exported");
        }
        Commands::Submit {
            customer_name,
            location,
            food_quality,
            service_speed,
            staff_friendliness,
            cleanliness,
            value_for_money,
            ambiance,
            overall_rating,
            comments,
        } => {
            let draft = SurveyDraft {
                customer_name,
                location,
                food_quality,
                service_speed,
                staff_friendliness,
                cleanliness,
                value_for_money,
                ambiance,
                overall_rating,
                comments: comments.filter(|c| !c.is_empty()),
            };

            let api = SurveyApi::new(http_client(settings)?, &settings.api_base_url);
            match api.submit(&draft).await {
                Ok(message) => info!(%message, "Survey submitted successfully"),
                Err(e) => {
                    return Err(e).context("there was an error submitting the survey");
                }
            }
        }
        Commands::Customers { source, customers } => {
            let source: Box<dyn ResponseSource> = match customers {
                None => response_source(source.as_deref(), settings)?,
                Some(customers) => match source.as_deref() {
                    Some(path) if !is_url(path) => {
                        Box::new(FileSource::new(path).with_customers(customers))
                    }
                    _ => anyhow::bail!("--customers can only be combined with a file --source"),
                },
            };
            let customers = source
                .fetch_customers()
                .await
                .context("error loading customers")?;

            let mut per_location: BTreeMap<&str, usize> = BTreeMap::new();
            for customer in &customers {
                info!(
                    id = customer.id,
                    name = %customer.customer_name,
                    location = %customer.location,
                    visit_date = ?customer.visit_date,
                    "Customer"
                );
                *per_location.entry(customer.location.as_str()).or_default() += 1;
            }

            for (location, count) in &per_location {
                info!(location, count, "Customers per location");
            }
            info!(total = customers.len(), "Customer list summary");
        }
    }

    Ok(())
}

fn http_client(settings: &Settings) -> Result<Box<dyn HttpClient>> {
    let basic = BasicClient::new()?;
    let client: Box<dyn HttpClient> = match settings.api_token.as_deref() {
        Some(token) => Box::new(ApiKey::bearer(basic, token)?),
        None => Box::new(basic),
    };
    Ok(client)
}

/// Reads from a local JSON file, or from the survey API when `source` is a
/// URL or absent.
fn response_source(source: Option<&str>, settings: &Settings) -> Result<Box<dyn ResponseSource>> {
    match source {
        Some(path) if !is_url(path) => Ok(Box::new(FileSource::new(path))),
        Some(url) => Ok(Box::new(SurveyApi::new(http_client(settings)?, url))),
        None => Ok(Box::new(SurveyApi::new(
            http_client(settings)?,
            &settings.api_base_url,
        ))),
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
