use crate::analyzer::LogReport;
use chrono::{DateTime, FixedOffset, TimeDelta};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub mod adoc;
pub mod markdown;

pub use adoc::AdocWriter;
pub use markdown::MarkdownWriter;

/// Default number of rows in the resource and response code tables
pub const DEFAULT_TOP_ROWS: usize = 3;

/// Document formats a report can be rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Adoc,
    Json,
}

impl OutputFormat {
    /// File extension used when the document is saved
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Adoc => "adoc",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write report: {0}")]
    Fmt(#[from] fmt::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sections every table-based document format has to provide
pub trait ReportWriter {
    fn write_general_info(&self, out: &mut dyn fmt::Write, report: &LogReport) -> fmt::Result;

    fn write_requested_resources(&self, out: &mut dyn fmt::Write, report: &LogReport, top: usize) -> fmt::Result;

    fn write_response_codes(&self, out: &mut dyn fmt::Write, report: &LogReport, top: usize) -> fmt::Result;

    fn write_top_addresses(&self, out: &mut dyn fmt::Write, report: &LogReport) -> fmt::Result;
}

/// Render `report` in `format`. `top` limits the resource and response code tables.
pub fn render(report: &LogReport, format: OutputFormat, top: usize) -> Result<String, RenderError> {
    match format {
        OutputFormat::Markdown => Ok(write_sections(&MarkdownWriter, report, top)?),
        OutputFormat::Adoc => Ok(write_sections(&AdocWriter, report, top)?),
        OutputFormat::Json => render_json(report, top),
    }
}

fn write_sections(writer: &dyn ReportWriter, report: &LogReport, top: usize) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writer.write_general_info(&mut out, report)?;
    writer.write_requested_resources(&mut out, report, top)?;
    writer.write_response_codes(&mut out, report, top)?;
    writer.write_top_addresses(&mut out, report)?;

    Ok(out)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    sources: &'a [String],
    start: Option<String>,
    end: Option<String>,
    total_requests: usize,
    avg_body_size: u64,
    p95_body_size: u64,
    avg_time_between_requests_ms: i64,
    requested_resources: Vec<ResourceCount<'a>>,
    response_codes: Vec<CodeCount<'a>>,
    top_addresses: Vec<AddressEntry<'a>>,
}

#[derive(Serialize)]
struct ResourceCount<'a> {
    resource: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct CodeCount<'a> {
    code: u16,
    name: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct AddressEntry<'a> {
    address: &'a str,
    count: usize,
}

fn render_json(report: &LogReport, top: usize) -> Result<String, RenderError> {
    let requested_resources = report
        .sorted_requested_resources
        .iter()
        .take(top)
        .map(|resource| ResourceCount {
            resource,
            count: report.requested_resources.get(resource).copied().unwrap_or(0),
        })
        .collect();

    let response_codes = report
        .sorted_response_codes
        .iter()
        .take(top)
        .filter_map(|code| {
            report.response_codes.get(code).map(|summary| CodeCount {
                code: *code,
                name: summary.name,
                count: summary.count,
            })
        })
        .collect();

    let top_addresses = report
        .top_addresses
        .iter()
        .map(|entry| AddressEntry {
            address: &entry.address,
            count: entry.count,
        })
        .collect();

    let output = JsonOutput {
        sources: &report.sources,
        start: report.start.map(|d| d.to_rfc3339()),
        end: report.end.map(|d| d.to_rfc3339()),
        total_requests: report.total_requests,
        avg_body_size: report.avg_body_size,
        p95_body_size: report.p95_body_size,
        avg_time_between_requests_ms: report.avg_time_between_requests.num_milliseconds(),
        requested_resources,
        response_codes,
        top_addresses,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

/// Group digits by thousands with `_`, e.g. `1234567` -> `1_234_567`
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            result.push('_');
        }
        result.push(ch);
    }

    result
}

/// Compact human form of a span: `24h 0m 0s`, `5m 3s`, `1.250s`
pub fn format_duration(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();

    let hours = delta.num_hours();
    let minutes = delta.num_minutes() % 60;
    let seconds = delta.num_seconds() % 60;
    let millis = delta.subsec_nanos() / 1_000_000;

    let secs = if millis > 0 {
        format!("{}.{:03}s", seconds, millis)
    } else {
        format!("{}s", seconds)
    };

    if hours > 0 {
        format!("{}{}h {}m {}", sign, hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}{}m {}", sign, minutes, secs)
    } else {
        format!("{}{}", sign, secs)
    }
}

/// Report window bound as `dd.mm.yyyy`, or `-` when unset
pub fn format_date(date: Option<DateTime<FixedOffset>>) -> String {
    match date {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => "-".to_string(),
    }
}
