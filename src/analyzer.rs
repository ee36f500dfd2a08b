use crate::parser::LogRecord;
use crate::status::status_name;
use chrono::{DateTime, FixedOffset, TimeDelta};
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::hash::Hash;
use thiserror::Error;

/// Number of requesting addresses kept in [`LogReport::top_addresses`]
pub const TOP_ADDRESSES: usize = 3;

/// Percentile reported for response body sizes
pub const BODY_SIZE_PERCENTILE: usize = 95;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no records to analyze")]
    NoRecords,
}

/// Run information echoed into the report rather than derived from the records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub sources: Vec<String>,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCode {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCount {
    pub address: String,
    pub count: usize,
}

/// Aggregate statistics over one set of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReport {
    pub sources: Vec<String>,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub total_requests: usize,
    pub avg_body_size: u64,
    pub p95_body_size: u64,
    pub avg_time_between_requests: TimeDelta,
    pub requested_resources: FxHashMap<String, usize>,
    pub sorted_requested_resources: Vec<String>,
    pub response_codes: FxHashMap<u16, ResponseCode>,
    pub sorted_response_codes: Vec<u16>,
    pub top_addresses: Vec<AddressCount>,
}

/// Counter that remembers the order keys were first seen in, so that
/// ranking by count breaks ties deterministically.
struct Tally<K> {
    counts: FxHashMap<K, usize>,
    first_seen: Vec<K>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
            first_seen: Vec::new(),
        }
    }

    fn add(&mut self, key: &K) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.clone(), 1);
                self.first_seen.push(key.clone());
            }
        }
    }

    /// Keys by descending count; equal counts keep first-seen order
    fn ranked(&self) -> Vec<K> {
        let mut keys = self.first_seen.clone();
        // sort_by_key is stable
        keys.sort_by_key(|key| Reverse(self.counts[key]));
        keys
    }

    fn into_counts(self) -> FxHashMap<K, usize> {
        self.counts
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnalyzer;

impl LogAnalyzer {
    pub fn new() -> Self {
        LogAnalyzer
    }

    /// Compute the report for `records`, which are taken in the order given.
    pub fn analyze(&self, records: &[LogRecord], header: ReportHeader) -> Result<LogReport, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::NoRecords);
        }

        // Wide enough for any number of u64 sizes
        let mut total_body_size: u128 = 0;
        let mut body_sizes = Vec::with_capacity(records.len());
        let mut addresses = Tally::new();
        let mut resources = Tally::new();
        let mut codes = Tally::new();
        let mut total_between = TimeDelta::zero();

        for (idx, record) in records.iter().enumerate() {
            total_body_size += u128::from(record.body_bytes_sent);
            body_sizes.push(record.body_bytes_sent);

            addresses.add(&record.remote_addr);
            resources.add(&record.url);
            codes.add(&record.status);

            // Arrival order, not chronological: unsorted input can add negative spans
            if idx > 0 {
                total_between += record.time_local - records[idx - 1].time_local;
            }
        }

        let total_requests = records.len();

        let top_addresses = addresses
            .ranked()
            .into_iter()
            .take(TOP_ADDRESSES)
            .map(|address| AddressCount {
                count: addresses.counts[&address],
                address,
            })
            .collect();

        let sorted_requested_resources = resources.ranked();
        let sorted_response_codes = codes.ranked();
        let response_codes = codes
            .into_counts()
            .into_iter()
            .map(|(code, count)| {
                (
                    code,
                    ResponseCode {
                        name: status_name(code),
                        count,
                    },
                )
            })
            .collect();

        Ok(LogReport {
            sources: header.sources,
            start: header.start,
            end: header.end,
            total_requests,
            avg_body_size: (total_body_size / total_requests as u128) as u64,
            p95_body_size: nearest_rank_percentile(&mut body_sizes, BODY_SIZE_PERCENTILE),
            avg_time_between_requests: average_interval(total_between, total_requests),
            requested_resources: resources.into_counts(),
            sorted_requested_resources,
            response_codes,
            sorted_response_codes,
            top_addresses,
        })
    }
}

/// Nearest-rank percentile: sorts `values` and returns the element at
/// `percentile * n / 100 - 1`, clamped to the first element. Returns 0 for
/// an empty slice.
pub fn nearest_rank_percentile(values: &mut [u64], percentile: usize) -> u64 {
    if values.is_empty() {
        return 0;
    }

    values.sort_unstable();
    let index = (percentile * values.len() / 100).saturating_sub(1);
    values[index.min(values.len() - 1)]
}

/// Mean gap between `count` consecutive requests; zero when there is no gap to average
pub fn average_interval(total: TimeDelta, count: usize) -> TimeDelta {
    if count <= 1 {
        return TimeDelta::zero();
    }

    let gaps = (count - 1) as i64;
    match total.num_nanoseconds() {
        Some(nanos) => TimeDelta::nanoseconds(nanos / gaps),
        None => TimeDelta::milliseconds(total.num_milliseconds() / gaps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_clamps_small_inputs() {
        assert_eq!(nearest_rank_percentile(&mut [7], 95), 7);
        assert_eq!(nearest_rank_percentile(&mut [], 95), 0);
    }

    #[test]
    fn test_percentile_uses_nearest_rank() {
        let mut sizes = [512, 0, 1024, 0, 0];
        assert_eq!(nearest_rank_percentile(&mut sizes, 95), 512);

        let mut hundred: Vec<u64> = (1..=100).collect();
        assert_eq!(nearest_rank_percentile(&mut hundred, 95), 95);
    }

    #[test]
    fn test_average_interval_single_record_is_zero() {
        assert_eq!(average_interval(TimeDelta::hours(5), 1), TimeDelta::zero());
        assert_eq!(average_interval(TimeDelta::zero(), 0), TimeDelta::zero());
    }

    #[test]
    fn test_average_interval_truncates() {
        assert_eq!(average_interval(TimeDelta::seconds(10), 4), TimeDelta::nanoseconds(3_333_333_333));
        assert_eq!(average_interval(TimeDelta::hours(-2), 3), TimeDelta::hours(-1));
    }

    #[test]
    fn test_tally_ties_keep_first_seen_order() {
        let mut tally = Tally::new();
        for key in ["b", "a", "c", "a", "c"] {
            tally.add(&key.to_string());
        }

        assert_eq!(tally.ranked(), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_average_body_size_does_not_overflow() {
        let half = u64::MAX / 2 + 1;
        let record = LogRecord {
            remote_addr: "10.0.0.1".to_string(),
            remote_user: "-".to_string(),
            time_local: DateTime::parse_from_rfc3339("2023-10-12T14:32:00+00:00").unwrap(),
            method: "GET".to_string(),
            url: "/big".to_string(),
            protocol: "HTTP/1.1".to_string(),
            status: 200,
            body_bytes_sent: half,
            referer: "-".to_string(),
            user_agent: "-".to_string(),
        };

        let report = LogAnalyzer::new()
            .analyze(&[record.clone(), record], ReportHeader::default())
            .unwrap();

        assert_eq!(report.avg_body_size, half);
        assert_eq!(report.p95_body_size, half);
    }
}
