use super::{ReportWriter, format_date, format_duration, format_number};
use crate::analyzer::LogReport;
use std::fmt::{self, Write};

/// AsciiDoc tables
#[derive(Debug, Default, Clone, Copy)]
pub struct AdocWriter;

fn open_table(out: &mut dyn Write, title: &str, cols: &str, header: &[&str]) -> fmt::Result {
    writeln!(out, "== {}\n", title)?;
    writeln!(out, "[cols=\"{}\", options=\"header\"]", cols)?;
    writeln!(out, "|===")?;
    writeln!(out, "| {}", header.join(" | "))?;
    writeln!(out)
}

fn close_table(out: &mut dyn Write) -> fmt::Result {
    writeln!(out, "|===\n")
}

impl ReportWriter for AdocWriter {
    fn write_general_info(&self, out: &mut dyn Write, report: &LogReport) -> fmt::Result {
        open_table(out, "General information", "2,3", &["Metric", "Value"])?;

        // Extra sources go on their own row with an empty metric cell
        for (idx, source) in report.sources.iter().enumerate() {
            let label = if idx == 0 { "File(s)" } else { "" };
            writeln!(out, "| {} | `{}`", label, source)?;
        }

        writeln!(out, "| Start date | {}", format_date(report.start))?;
        writeln!(out, "| End date | {}", format_date(report.end))?;
        writeln!(out, "| Number of requests | {}", format_number(report.total_requests as u64))?;
        writeln!(out, "| Average response size | {}b", format_number(report.avg_body_size))?;
        writeln!(out, "| 95p response size | {}b", format_number(report.p95_body_size))?;
        writeln!(
            out,
            "| Average time between requests | {}",
            format_duration(report.avg_time_between_requests)
        )?;

        close_table(out)
    }

    fn write_requested_resources(&self, out: &mut dyn Write, report: &LogReport, top: usize) -> fmt::Result {
        open_table(out, "Requested resources", "3,1", &["Resource", "Count"])?;

        for resource in report.sorted_requested_resources.iter().take(top) {
            let count = report.requested_resources.get(resource).copied().unwrap_or(0);
            writeln!(out, "| `{}` | {}", resource, format_number(count as u64))?;
        }

        close_table(out)
    }

    fn write_response_codes(&self, out: &mut dyn Write, report: &LogReport, top: usize) -> fmt::Result {
        open_table(out, "Response codes", "1,3,1", &["Code", "Name", "Count"])?;

        for code in report.sorted_response_codes.iter().take(top) {
            if let Some(summary) = report.response_codes.get(code) {
                writeln!(out, "| {} | {} | {}", code, summary.name, format_number(summary.count as u64))?;
            }
        }

        close_table(out)
    }

    fn write_top_addresses(&self, out: &mut dyn Write, report: &LogReport) -> fmt::Result {
        if report.top_addresses.is_empty() {
            return Ok(());
        }

        open_table(out, "Top IP addresses", "2,1", &["IP address", "Requests"])?;

        for entry in &report.top_addresses {
            writeln!(out, "| {} | {}", entry.address, format_number(entry.count as u64))?;
        }

        close_table(out)
    }
}
