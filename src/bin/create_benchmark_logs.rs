use chrono::{Duration, FixedOffset, TimeZone};
use sawmill::parser::LogRecord;
use sawmill::parser::combined::format_line;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Creates benchmark access logs with the specified number of lines.
/// These logs follow the combined format for consistent comparisons.
fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <number-of-lines> <output-file>", args[0]);
        std::process::exit(1);
    }

    let num_lines: usize = match args[1].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Invalid number of lines: {}", args[1]);
            std::process::exit(1);
        }
    };
    let file_path = &args[2];

    println!("Creating log file with {} lines at {}", num_lines, file_path);
    create_benchmark_logs(num_lines, file_path)?;
    println!("Log file created successfully.");

    Ok(())
}

/// Write `lines` combined-format entries one second apart, cycling through
/// a fixed set of clients, resources and status codes.
fn create_benchmark_logs(lines: usize, file_path: &str) -> io::Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = BufWriter::new(File::create(file_path)?);

    let utc = FixedOffset::east_opt(0).ok_or_else(|| io::Error::other("invalid offset"))?;
    let start = utc
        .with_ymd_and_hms(2025, 3, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| io::Error::other("invalid start time"))?;

    for i in 0..lines {
        let (method, url) = match i % 10 {
            0 => ("GET", "/"),
            1 => ("GET", "/index.html"),
            2 => ("GET", "/api/users"),
            3 => ("POST", "/api/orders"),
            4 => ("GET", "/static/app.js"),
            5 => ("GET", "/static/style.css"),
            6 => ("PUT", "/api/users/42"),
            7 => ("DELETE", "/api/orders/7"),
            8 => ("GET", "/downloads/product_1.zip"),
            _ => ("HEAD", "/health"),
        };

        let status = match i % 20 {
            0 => 404,
            1 => 500,
            2 => 301,
            3 => 304,
            4 => 403,
            _ => 200,
        };

        let agent = match i % 3 {
            0 => "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
            1 => "curl/8.4.0",
            _ => "Wget/1.21.4",
        };

        let record = LogRecord {
            remote_addr: format!("10.0.{}.{}", (i / 250) % 256, i % 250 + 1),
            remote_user: "-".to_string(),
            time_local: start + Duration::seconds(i as i64),
            method: method.to_string(),
            url: url.to_string(),
            protocol: "HTTP/1.1".to_string(),
            status,
            body_bytes_sent: ((i * 7919) % 65_536) as u64,
            referer: "-".to_string(),
            user_agent: agent.to_string(),
        };

        writeln!(file, "{}", format_line(&record))?;
    }

    file.flush()
}
