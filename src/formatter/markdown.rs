use super::{ReportWriter, format_date, format_duration, format_number};
use crate::analyzer::LogReport;
use std::fmt::{self, Write};

/// GitHub-flavoured Markdown tables
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownWriter;

impl ReportWriter for MarkdownWriter {
    fn write_general_info(&self, out: &mut dyn Write, report: &LogReport) -> fmt::Result {
        writeln!(out, "## General information\n")?;
        writeln!(out, "| **Metric**                      | **Value**                 |")?;
        writeln!(out, "|---------------------------------|---------------------------|")?;

        for (idx, source) in report.sources.iter().enumerate() {
            let label = if idx == 0 { "File(s)" } else { "" };
            writeln!(out, "| {:<31} | {:<25} |", label, format!("`{}`", source))?;
        }

        writeln!(out, "| {:<31} | {:<25} |", "Start date", format_date(report.start))?;
        writeln!(out, "| {:<31} | {:<25} |", "End date", format_date(report.end))?;
        writeln!(
            out,
            "| {:<31} | {:<25} |",
            "Number of requests",
            format_number(report.total_requests as u64)
        )?;
        writeln!(
            out,
            "| {:<31} | {:<25} |",
            "Average response size",
            format!("{}b", format_number(report.avg_body_size))
        )?;
        writeln!(
            out,
            "| {:<31} | {:<25} |",
            "95p response size",
            format!("{}b", format_number(report.p95_body_size))
        )?;
        writeln!(
            out,
            "| {:<31} | {:<25} |",
            "Average time between requests",
            format_duration(report.avg_time_between_requests)
        )?;
        writeln!(out)
    }

    fn write_requested_resources(&self, out: &mut dyn Write, report: &LogReport, top: usize) -> fmt::Result {
        writeln!(out, "## Requested resources\n")?;
        writeln!(out, "| **Resource**           | **Count**                 |")?;
        writeln!(out, "|------------------------|---------------------------|")?;

        for resource in report.sorted_requested_resources.iter().take(top) {
            let count = report.requested_resources.get(resource).copied().unwrap_or(0);
            writeln!(
                out,
                "| {:<22} | {:<25} |",
                format!("`{}`", resource),
                format_number(count as u64)
            )?;
        }

        writeln!(out)
    }

    fn write_response_codes(&self, out: &mut dyn Write, report: &LogReport, top: usize) -> fmt::Result {
        writeln!(out, "## Response codes\n")?;
        writeln!(out, "| **Code** | **Name**                        | **Count**           |")?;
        writeln!(out, "|----------|---------------------------------|---------------------|")?;

        for code in report.sorted_response_codes.iter().take(top) {
            if let Some(summary) = report.response_codes.get(code) {
                writeln!(
                    out,
                    "| {:<8} | {:<31} | {:<19} |",
                    code,
                    summary.name,
                    format_number(summary.count as u64)
                )?;
            }
        }

        writeln!(out)
    }

    fn write_top_addresses(&self, out: &mut dyn Write, report: &LogReport) -> fmt::Result {
        if report.top_addresses.is_empty() {
            return Ok(());
        }

        writeln!(out, "## Top IP addresses\n")?;
        writeln!(out, "| **IP address**        | **Requests**              |")?;
        writeln!(out, "|-----------------------|---------------------------|")?;

        for entry in &report.top_addresses {
            writeln!(out, "| {:<21} | {:<25} |", entry.address, format_number(entry.count as u64))?;
        }

        writeln!(out)
    }
}
