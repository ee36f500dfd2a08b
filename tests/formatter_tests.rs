use chrono::{FixedOffset, TimeDelta, TimeZone};
use rustc_hash::FxHashMap;
use sawmill::analyzer::{AddressCount, LogReport, ResponseCode};
use sawmill::formatter::{OutputFormat, render};

fn sample_report() -> LogReport {
    let mut requested_resources = FxHashMap::default();
    requested_resources.insert("/api/data".to_string(), 1500);
    requested_resources.insert("/api/otherdata".to_string(), 20);
    requested_resources.insert("/login".to_string(), 7);
    requested_resources.insert("/favicon.ico".to_string(), 1);

    let mut response_codes = FxHashMap::default();
    response_codes.insert(200, ResponseCode { name: "OK", count: 1400 });
    response_codes.insert(404, ResponseCode { name: "Not Found", count: 120 });
    response_codes.insert(500, ResponseCode { name: "Internal Server Error", count: 8 });

    LogReport {
        sources: vec!["access.log".to_string(), "access.log.1".to_string()],
        start: Some(
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2023, 10, 12, 0, 0, 0)
                .unwrap(),
        ),
        end: None,
        total_requests: 1528,
        avg_body_size: 2048,
        p95_body_size: 16384,
        avg_time_between_requests: TimeDelta::seconds(303),
        requested_resources,
        sorted_requested_resources: vec![
            "/api/data".to_string(),
            "/api/otherdata".to_string(),
            "/login".to_string(),
            "/favicon.ico".to_string(),
        ],
        response_codes,
        sorted_response_codes: vec![200, 404, 500],
        top_addresses: vec![
            AddressCount {
                address: "192.168.1.1".to_string(),
                count: 900,
            },
            AddressCount {
                address: "10.0.0.7".to_string(),
                count: 628,
            },
        ],
    }
}

#[test]
fn test_markdown_general_info() {
    let output = render(&sample_report(), OutputFormat::Markdown, 3).unwrap();

    assert!(output.starts_with("## General information\n"));
    assert!(output.contains("| File(s)                         | `access.log`              |"));
    assert!(output.contains("|                                 | `access.log.1`            |"));
    assert!(output.contains("| Start date                      | 12.10.2023                |"));
    assert!(output.contains("| End date                        | -                         |"));
    assert!(output.contains("| Number of requests              | 1_528                     |"));
    assert!(output.contains("| Average response size           | 2_048b                    |"));
    assert!(output.contains("| 95p response size               | 16_384b                   |"));
    assert!(output.contains("| Average time between requests   | 5m 3s                     |"));
}

#[test]
fn test_markdown_tables_respect_top() {
    let output = render(&sample_report(), OutputFormat::Markdown, 3).unwrap();

    assert!(output.contains("## Requested resources"));
    assert!(output.contains("| `/api/data`            | 1_500                     |"));
    assert!(output.contains("`/login`"));
    assert!(!output.contains("`/favicon.ico`"));

    assert!(output.contains("## Response codes"));
    assert!(output.contains("| 404      | Not Found                       | 120                 |"));

    assert!(output.contains("## Top IP addresses"));
    assert!(output.contains("| 192.168.1.1           | 900                       |"));

    let narrow = render(&sample_report(), OutputFormat::Markdown, 1).unwrap();
    assert!(!narrow.contains("`/api/otherdata`"));
    assert!(!narrow.contains("Not Found"));
}

#[test]
fn test_markdown_section_order() {
    let output = render(&sample_report(), OutputFormat::Markdown, 3).unwrap();

    let general = output.find("## General information").unwrap();
    let resources = output.find("## Requested resources").unwrap();
    let codes = output.find("## Response codes").unwrap();
    let addresses = output.find("## Top IP addresses").unwrap();

    assert!(general < resources && resources < codes && codes < addresses);
}

#[test]
fn test_addresses_section_omitted_when_empty() {
    let mut report = sample_report();
    report.top_addresses.clear();

    let markdown = render(&report, OutputFormat::Markdown, 3).unwrap();
    let adoc = render(&report, OutputFormat::Adoc, 3).unwrap();

    assert!(!markdown.contains("Top IP addresses"));
    assert!(!adoc.contains("Top IP addresses"));
}

#[test]
fn test_adoc_output() {
    let output = render(&sample_report(), OutputFormat::Adoc, 3).unwrap();

    assert!(output.starts_with("== General information\n"));
    assert!(output.contains("[cols=\"2,3\", options=\"header\"]"));
    assert!(output.contains("| File(s) | `access.log`"));
    assert!(output.contains("| Start date | 12.10.2023"));
    assert!(output.contains("| Number of requests | 1_528"));
    assert!(output.contains("| `/api/data` | 1_500"));
    assert!(output.contains("| 500 | Internal Server Error | 8"));
    assert!(output.contains("| 10.0.0.7 | 628"));
    assert_eq!(output.matches("|===").count(), 8);
}

#[test]
fn test_json_output() {
    let output = render(&sample_report(), OutputFormat::Json, 2).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["total_requests"], 1528);
    assert_eq!(value["avg_body_size"], 2048);
    assert_eq!(value["p95_body_size"], 16384);
    assert_eq!(value["avg_time_between_requests_ms"], 303_000);
    assert_eq!(value["start"], "2023-10-12T00:00:00+00:00");
    assert!(value["end"].is_null());
    assert_eq!(value["sources"][1], "access.log.1");

    let resources = value["requested_resources"].as_array().unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0]["resource"], "/api/data");
    assert_eq!(resources[0]["count"], 1500);

    let codes = value["response_codes"].as_array().unwrap();
    assert_eq!(codes[1]["code"], 404);
    assert_eq!(codes[1]["name"], "Not Found");

    assert_eq!(value["top_addresses"][0]["address"], "192.168.1.1");
}
