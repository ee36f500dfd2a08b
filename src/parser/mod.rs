use chrono::{DateTime, FixedOffset};
use rayon::prelude::*;
use thiserror::Error;

/// Trait defining the interface for access log line parsers
pub trait LogParser: Send + Sync {
    /// Returns the name of the parser
    fn name(&self) -> &'static str;

    /// Parses a single line into a typed record
    fn parse_line(&self, line: &str) -> Result<LogRecord, ParseError>;
}

/// One parsed access log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub remote_addr: String,
    pub remote_user: String,
    pub time_local: DateTime<FixedOffset>,
    pub method: String,
    pub url: String,
    pub protocol: String,
    pub status: u16,
    pub body_bytes_sent: u64,
    pub referer: String,
    pub user_agent: String,
}

/// Reasons a single line cannot be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed log line: {0}")]
    MalformedLine(String),

    #[error("bad timestamp '{value}': {reason}")]
    BadTimestamp { value: String, reason: String },

    #[error("bad integer in field '{field}': {value}")]
    BadInteger { field: &'static str, value: String },
}

/// A parse failure together with the 1-based line it happened on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: {source}")]
pub struct LineParseError {
    pub line_number: usize,
    #[source]
    pub source: ParseError,
}

/// Parse every line in order, stopping at the first line that fails.
pub fn parse_all<P, I, S>(parser: &P, lines: I) -> Result<Vec<LogRecord>, LineParseError>
where
    P: LogParser + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            parser.parse_line(line.as_ref()).map_err(|source| LineParseError {
                line_number: idx + 1,
                source,
            })
        })
        .collect()
}

/// Parse lines on the rayon pool.
///
/// The result is identical to [`parse_all`]: records keep input order and,
/// when several lines are bad, the error reported is the earliest one.
pub fn parse_all_parallel<P, S>(parser: &P, lines: &[S]) -> Result<Vec<LogRecord>, LineParseError>
where
    P: LogParser + ?Sized,
    S: AsRef<str> + Sync,
{
    let parsed: Vec<Result<LogRecord, ParseError>> = lines
        .par_iter()
        .map(|line| parser.parse_line(line.as_ref()))
        .collect();

    parsed
        .into_iter()
        .enumerate()
        .map(|(idx, result)| {
            result.map_err(|source| LineParseError {
                line_number: idx + 1,
                source,
            })
        })
        .collect()
}

pub mod combined;

pub use combined::CombinedLogParser;
