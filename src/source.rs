use log::{debug, info};
use memchr::memchr_iter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Timeout for fetching logs over HTTP
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("'{0}' is neither an existing local path nor a URL")]
    InvalidPath(String),

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned {status}")]
    HttpStatus { url: String, status: reqwest::StatusCode },
}

/// Where raw log lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// Glob pattern over local files
    Local(String),
    Url(Url),
}

impl LogSource {
    /// Decide whether `path` names local files or a remote resource.
    ///
    /// Local paths win: a pattern that matches at least one file, or a path
    /// that exists, is local. Otherwise it must be a URL with a scheme and host.
    pub fn detect(path: &str) -> Result<Self, SourceError> {
        let local = expand_home(path);

        if local_exists(&local) {
            return Ok(LogSource::Local(local));
        }

        match Url::parse(path) {
            Ok(url) if url.has_host() && !url.scheme().is_empty() => Ok(LogSource::Url(url)),
            _ => Err(SourceError::InvalidPath(path.to_string())),
        }
    }

    /// Files matched by a local pattern, in glob order
    pub fn files(&self) -> Result<Vec<PathBuf>, SourceError> {
        match self {
            LogSource::Local(pattern) => matched_files(pattern),
            LogSource::Url(_) => Ok(Vec::new()),
        }
    }

    /// Display names for the report header: file names, or the URL itself
    pub fn labels(&self) -> Result<Vec<String>, SourceError> {
        match self {
            LogSource::Local(_) => Ok(self
                .files()?
                .iter()
                .map(|path| {
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string())
                })
                .collect()),
            LogSource::Url(url) => Ok(vec![url.to_string()]),
        }
    }

    /// All lines of every file, concatenated in order
    pub fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        match self {
            LogSource::Local(pattern) => {
                let mut lines = Vec::new();
                for path in matched_files(pattern)? {
                    let buffer = std::fs::read(&path).map_err(|source| SourceError::Read {
                        path: path.clone(),
                        source,
                    })?;
                    let before = lines.len();
                    lines.extend(split_lines(&buffer));
                    debug!("Read {} lines from {}", lines.len() - before, path.display());
                }
                Ok(lines)
            }
            LogSource::Url(url) => fetch_lines(url),
        }
    }
}

fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            let rest = rest.trim_start_matches(['/', '\\']);
            return Path::new(&home).join(rest).to_string_lossy().into_owned();
        }
    }
    path.to_string()
}

fn local_exists(pattern: &str) -> bool {
    if Path::new(pattern).exists() {
        return true;
    }

    matches!(matched_files(pattern), Ok(files) if !files.is_empty())
}

fn matched_files(pattern: &str) -> Result<Vec<PathBuf>, SourceError> {
    let paths = glob::glob(pattern).map_err(|source| SourceError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    // Unreadable directory entries are skipped, as the shell would
    Ok(paths.filter_map(Result::ok).filter(|path| path.is_file()).collect())
}

fn fetch_lines(url: &Url) -> Result<Vec<String>, SourceError> {
    info!("Fetching logs from {}", url);

    let fetch_err = |source| SourceError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_err)?;

    let response = client.get(url.as_str()).send().map_err(fetch_err)?;

    if response.status() != reqwest::StatusCode::OK {
        return Err(SourceError::HttpStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response.bytes().map_err(fetch_err)?;
    Ok(split_lines(&body))
}

/// Split a buffer into lines on `\n`, dropping a trailing `\r` from each line.
/// A final newline does not start an extra empty line.
pub fn split_lines(buffer: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;

    for end in memchr_iter(b'\n', buffer) {
        lines.push(decode_line(&buffer[start..end]));
        start = end + 1;
    }

    if start < buffer.len() {
        lines.push(decode_line(&buffer[start..]));
    }

    lines
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
