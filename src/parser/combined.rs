use super::{LogParser, LogRecord, ParseError};
use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;

/// Layout of the `[time_local]` token, e.g. `12/Oct/2023:14:32:00 +0000`
pub const TIME_LOCAL_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

lazy_static! {
    static ref COMBINED_REGEX: Regex = Regex::new(
        r#"(?P<remote_addr>\S+) - (?P<remote_user>\S+) \[(?P<time_local>\S+\s\S+)\] "(?P<request>[^"]*)" (?P<status>\d+) (?P<body_bytes_sent>\d+) "(?P<referer>[^"]*)" "(?P<user_agent>[^"]*)""#
    ).unwrap();
}

/// Parser for the Apache/Nginx "combined" access log format:
///
/// `REMOTE_ADDR - REMOTE_USER [DD/Mon/YYYY:HH:MM:SS +ZZZZ] "METHOD PATH PROTOCOL" STATUS BODY_BYTES "REFERER" "USER_AGENT"`
#[derive(Debug, Default, Clone, Copy)]
pub struct CombinedLogParser;

impl CombinedLogParser {
    pub fn new() -> Self {
        Self
    }
}

impl LogParser for CombinedLogParser {
    fn name(&self) -> &'static str {
        "Combined"
    }

    fn parse_line(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = COMBINED_REGEX
            .captures(line)
            .ok_or_else(|| ParseError::MalformedLine(line.to_string()))?;

        // Every group is mandatory in the pattern, so a match always has all of them
        let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());

        let mut request = field("request").split_whitespace();
        let (method, url, protocol) = match (request.next(), request.next(), request.next(), request.next()) {
            (Some(method), Some(url), Some(protocol), None) => (method, url, protocol),
            _ => return Err(ParseError::MalformedLine(line.to_string())),
        };

        let time_str = field("time_local");
        let time_local = DateTime::<FixedOffset>::parse_from_str(time_str, TIME_LOCAL_FORMAT)
            .map_err(|e| ParseError::BadTimestamp {
                value: time_str.to_string(),
                reason: e.to_string(),
            })?;

        let status_str = field("status");
        let status = status_str.parse::<u16>().map_err(|_| ParseError::BadInteger {
            field: "status",
            value: status_str.to_string(),
        })?;

        let bytes_str = field("body_bytes_sent");
        let body_bytes_sent = bytes_str.parse::<u64>().map_err(|_| ParseError::BadInteger {
            field: "body_bytes_sent",
            value: bytes_str.to_string(),
        })?;

        Ok(LogRecord {
            remote_addr: field("remote_addr").to_string(),
            remote_user: field("remote_user").to_string(),
            time_local,
            method: method.to_string(),
            url: url.to_string(),
            protocol: protocol.to_string(),
            status,
            body_bytes_sent,
            referer: field("referer").to_string(),
            user_agent: field("user_agent").to_string(),
        })
    }
}

/// Render a record back into a combined-format line
pub fn format_line(record: &LogRecord) -> String {
    format!(
        r#"{} - {} [{}] "{} {} {}" {} {} "{}" "{}""#,
        record.remote_addr,
        record.remote_user,
        record.time_local.format(TIME_LOCAL_FORMAT),
        record.method,
        record.url,
        record.protocol,
        record.status,
        record.body_bytes_sent,
        record.referer,
        record.user_agent
    )
}
