//! Output formatting for dashboard reports and raw-response exports.
//!
//! Reports can be logged as debug output or JSON, or rendered as a plain-text
//! summary. Filtered responses export to CSV or TSV, optionally gzipped.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::{DashboardReport, Sentiment};
use crate::model::{ATTRIBUTES, SatisfactionLevel, SurveyResponse};

/// Comments shown per sentiment bucket in the summary.
pub const FEEDBACK_PREVIEW: usize = 3;

/// Column headers of the raw-response export.
pub const EXPORT_HEADERS: [&str; 12] = [
    "Customer Name",
    "Location",
    "Visit Date",
    "Food Quality",
    "Service Speed",
    "Staff Friendliness",
    "Cleanliness",
    "Value for Money",
    "Ambiance",
    "Overall Rating",
    "Comments",
    "Submission Date",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &DashboardReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &DashboardReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Renders the dashboard cards as plain text.
pub fn render_summary(report: &DashboardReport) -> String {
    let mut out = String::new();
    let overall = &report.overall;

    let _ = writeln!(out, "# Customer Satisfaction Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total responses:    {}", report.total_responses);
    let _ = writeln!(out, "Satisfaction rate:  {:.1}%", overall.satisfaction_rate);
    let _ = writeln!(out, "Average rating:     {:.1}/5", overall.average_overall_rating);
    let _ = writeln!(out, "Response rate:      {:.1}%", report.response_rate);
    let _ = writeln!(out, "Most popular:       {}", report.most_popular_location);

    let _ = writeln!(out);
    let _ = writeln!(out, "## Overall Satisfaction");
    for share in &overall.distribution {
        let _ = writeln!(
            out,
            "- {}: {}% ({})",
            share.level, share.percentage, share.count
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Attributes");
    for ((rating, breakdown), radar) in report
        .attributes
        .ratings
        .iter()
        .zip(&report.attributes.breakdown)
        .zip(&report.attributes.radar)
    {
        let shares: Vec<String> = SatisfactionLevel::ALL
            .iter()
            .map(|level| format!("{}%", breakdown.percentage(*level)))
            .collect();
        let _ = writeln!(
            out,
            "- {}: {:.1}/5 (radar {:.1}) [{}]",
            rating.label,
            rating.rating,
            radar.score,
            shares.join(" / ")
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Locations");
    if report.locations.is_empty() {
        let _ = writeln!(out, "No responses for this selection.");
    }
    for location in &report.locations {
        let _ = writeln!(
            out,
            "- {}: {} responses, avg {:.2}, {}% satisfied",
            location.location,
            location.response_count,
            location.average_rating,
            location.satisfaction_percentage
        );
    }

    for (title, sentiment) in [
        ("Positive Feedback", Sentiment::Positive),
        ("Neutral Feedback", Sentiment::Neutral),
        ("Areas for Improvement", Sentiment::Negative),
    ] {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {title}");
        let comments = report.feedback.top(sentiment, FEEDBACK_PREVIEW);
        if comments.is_empty() {
            let _ = writeln!(out, "No feedback yet.");
        }
        for comment in comments {
            let _ = writeln!(out, "- \"{comment}\"");
        }
    }

    out
}

fn export_row(response: &SurveyResponse) -> Vec<String> {
    let text = |value: Option<&str>| value.unwrap_or_default().to_string();

    let mut row = Vec::with_capacity(EXPORT_HEADERS.len());
    row.push(text(response.customer_name.as_deref()));
    row.push(text(response.location.as_deref()));
    row.push(
        response
            .visit_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    for (_, accessor) in ATTRIBUTES.iter() {
        row.push(text(accessor(response)));
    }
    row.push(
        response
            .overall_rating
            .map(|r| r.to_string())
            .unwrap_or_default(),
    );
    row.push(text(response.comments.as_deref()));
    row.push(
        response
            .created_at
            .map(|dt| dt.date().to_string())
            .unwrap_or_default(),
    );
    row
}

/// Writes responses to `writer` as CSV or TSV, header first. Returns the
/// number of data rows written.
pub fn export_responses<'a, W, I>(writer: W, responses: I, format: ExportFormat) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);

    writer.write_record(EXPORT_HEADERS)?;
    let mut rows = 0usize;
    for response in responses {
        writer.write_record(export_row(response))?;
        rows += 1;
    }
    writer.flush()?;

    Ok(rows)
}

/// Exports responses to a file at `path`, gzip-compressed when `gzip` is set.
pub fn write_export<'a, I>(
    path: &Path,
    responses: I,
    format: ExportFormat,
    gzip: bool,
) -> Result<usize>
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;

    let rows = if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        let rows = export_responses(&mut encoder, responses, format)?;
        encoder.finish()?;
        rows
    } else {
        export_responses(file, responses, format)?
    };

    info!(path = %path.display(), rows, gzip, "Export written");
    Ok(rows)
}

/// `survey-responses-YYYY-MM-DD.csv`, with `.gz` appended when compressed.
pub fn default_export_name(format: ExportFormat, today: NaiveDate, gzip: bool) -> String {
    let mut name = format!("survey-responses-{}.{}", today.format("%Y-%m-%d"), format.extension());
    if gzip {
        name.push_str(".gz");
    }
    name
}
