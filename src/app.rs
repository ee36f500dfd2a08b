use crate::analyzer::{LogAnalyzer, LogReport, ReportHeader};
use crate::config::{Config, ParseMode};
use crate::error::Result;
use crate::filter::{FilterCriteria, filter_records};
use crate::formatter::render;
use crate::parser::{CombinedLogParser, LogParser, LogRecord, parse_all, parse_all_parallel};
use crate::saver::save;
use log::{debug, info, warn};
use std::path::PathBuf;

/// Line count above which parsing goes to the rayon pool in [`ParseMode::Auto`]
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: LogReport,
    pub document: String,
    pub saved_to: PathBuf,
}

/// Parse `lines` with the combined-format parser, sequentially or on the rayon pool
pub fn parse_lines<S>(lines: &[S], mode: ParseMode) -> Result<Vec<LogRecord>>
where
    S: AsRef<str> + Sync,
{
    let parser = CombinedLogParser::new();
    let parallel = match mode {
        ParseMode::Parallel => true,
        ParseMode::Sequential => false,
        ParseMode::Auto => lines.len() >= PARALLEL_THRESHOLD,
    };

    debug!(
        "Parsing {} lines with the {} parser ({})",
        lines.len(),
        parser.name(),
        if parallel { "parallel" } else { "sequential" }
    );

    let records = if parallel {
        parse_all_parallel(&parser, lines)?
    } else {
        parse_all(&parser, lines)?
    };

    Ok(records)
}

/// Parse, filter and analyze raw lines without touching the filesystem
pub fn analyze_lines<S>(
    lines: &[S],
    criteria: &FilterCriteria,
    header: ReportHeader,
    mode: ParseMode,
) -> Result<LogReport>
where
    S: AsRef<str> + Sync,
{
    let records = parse_lines(lines, mode)?;
    let filtered = filter_records(&records, criteria);

    if filtered.is_empty() && !records.is_empty() {
        warn!("Filter removed all {} records", records.len());
    } else {
        debug!("{} of {} records passed the filter", filtered.len(), records.len());
    }

    Ok(LogAnalyzer::new().analyze(&filtered, header)?)
}

/// Run the whole pipeline for `config` and save the rendered report
pub fn run(config: &Config) -> Result<RunOutcome> {
    let lines = config.source.read_lines()?;
    info!("Read {} lines", lines.len());

    let criteria = config.criteria()?;
    let report = analyze_lines(&lines, &criteria, config.header()?, config.parse_mode)?;
    info!("Analyzed {} requests", report.total_requests);

    let document = render(&report, config.format, config.top)?;
    let saved_to = save(&document, &config.output, config.format)?;

    Ok(RunOutcome {
        report,
        document,
        saved_to,
    })
}
