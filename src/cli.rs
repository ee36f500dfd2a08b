use crate::filter::FilterField;
use crate::formatter::{DEFAULT_TOP_ROWS, OutputFormat};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "sawmill")]
#[clap(about = "Sawmill: cut access logs into reports", long_about = None)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Log files (glob pattern) or URL to analyze
    #[clap(long)]
    pub path: String,

    /// Only count requests after this moment (YYYY-MM-DD or RFC 3339)
    #[clap(long)]
    pub from: Option<String>,

    /// Only count requests before this moment (YYYY-MM-DD or RFC 3339)
    #[clap(long)]
    pub to: Option<String>,

    /// Report format
    #[clap(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Record field to filter on
    #[clap(long, value_enum)]
    pub filter_field: Option<FilterField>,

    /// Regular expression the filter field has to match
    #[clap(long)]
    pub filter_value: Option<String>,

    /// Base name of the saved report; the extension follows the format
    #[clap(long, short, default_value = "analyze")]
    pub output: String,

    /// Number of rows in the resource and response code tables
    #[clap(long, default_value_t = DEFAULT_TOP_ROWS)]
    pub top: usize,

    /// Also print the report to stdout
    #[clap(long)]
    pub print: bool,

    /// Force parallel parsing (default: auto-detect based on line count)
    #[clap(long)]
    pub parallel: bool,

    /// Force sequential parsing (overrides parallel)
    #[clap(long)]
    pub sequential: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
