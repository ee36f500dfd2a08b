// Declare our modules
pub mod analyzer;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod parser;
pub mod saver;
pub mod source;
pub mod status;

// Re-export key types for convenience
pub use analyzer::{LogAnalyzer, LogReport, ReportHeader};
pub use cli::Args;
pub use config::Config;
pub use error::{Error, Result};
pub use filter::{FilterCriteria, FilterField, filter_records};
pub use formatter::{OutputFormat, render};
pub use parser::{CombinedLogParser, LogParser, LogRecord, ParseError};
