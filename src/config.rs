use crate::analyzer::ReportHeader;
use crate::cli::Args;
use crate::filter::{FilterCriteria, FilterError, FilterField};
use crate::formatter::OutputFormat;
use crate::source::{LogSource, SourceError};
use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("invalid date for --{flag}: '{value}' (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate { flag: &'static str, value: String },

    #[error("--from ({from}) must be earlier than --to ({to})")]
    EmptyWindow { from: String, to: String },

    #[error("--filter-value requires --filter-field")]
    FilterValueWithoutField,

    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// How the parser stage should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Auto,
    Parallel,
    Sequential,
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub source: LogSource,
    pub from: Option<DateTime<FixedOffset>>,
    pub to: Option<DateTime<FixedOffset>>,
    pub format: OutputFormat,
    pub filter_field: Option<FilterField>,
    pub filter_pattern: Option<Regex>,
    pub output: PathBuf,
    pub top: usize,
    pub print: bool,
    pub parse_mode: ParseMode,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let source = LogSource::detect(&args.path)?;

        let from = args.from.as_deref().map(|v| parse_bound("from", v)).transpose()?;
        let to = args.to.as_deref().map(|v| parse_bound("to", v)).transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from >= to {
                return Err(ConfigError::EmptyWindow {
                    from: from.to_rfc3339(),
                    to: to.to_rfc3339(),
                });
            }
        }

        // A field without a value filters on the empty pattern, which matches everything
        let filter_pattern = match (args.filter_field, args.filter_value.as_deref()) {
            (None, Some(value)) if !value.is_empty() => return Err(ConfigError::FilterValueWithoutField),
            (None, _) => None,
            (Some(_), value) => Some(Regex::new(value.unwrap_or(""))?),
        };

        let parse_mode = if args.sequential {
            ParseMode::Sequential
        } else if args.parallel {
            ParseMode::Parallel
        } else {
            ParseMode::Auto
        };

        Ok(Config {
            source,
            from,
            to,
            format: args.format,
            filter_field: args.filter_field,
            filter_pattern,
            output: PathBuf::from(&args.output),
            top: args.top,
            print: args.print,
            parse_mode,
        })
    }

    pub fn criteria(&self) -> Result<FilterCriteria, FilterError> {
        FilterCriteria::new(self.from, self.to, self.filter_field, self.filter_pattern.clone())
    }

    pub fn header(&self) -> Result<ReportHeader, SourceError> {
        Ok(ReportHeader {
            sources: self.source.labels()?,
            start: self.from,
            end: self.to,
        })
    }
}

/// Parse a `--from`/`--to` value: a bare date means midnight UTC
pub fn parse_bound(flag: &'static str, value: &str) -> Result<DateTime<FixedOffset>, ConfigError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }

    DateTime::parse_from_rfc3339(value).map_err(|_| ConfigError::InvalidDate {
        flag,
        value: value.to_string(),
    })
}
