use crate::parser::LogRecord;
use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Record field a filter pattern can be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FilterField {
    Agent,
    Address,
    User,
    Method,
    Url,
    Protocol,
    Status,
    Referer,
}

impl FilterField {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Agent => "agent",
            FilterField::Address => "address",
            FilterField::User => "user",
            FilterField::Method => "method",
            FilterField::Url => "url",
            FilterField::Protocol => "protocol",
            FilterField::Status => "status",
            FilterField::Referer => "referer",
        }
    }

    /// String form of this field on a record; status becomes its decimal string
    pub fn value_of(self, record: &LogRecord) -> Cow<'_, str> {
        match self {
            FilterField::Agent => Cow::Borrowed(&record.user_agent),
            FilterField::Address => Cow::Borrowed(&record.remote_addr),
            FilterField::User => Cow::Borrowed(&record.remote_user),
            FilterField::Method => Cow::Borrowed(&record.method),
            FilterField::Url => Cow::Borrowed(&record.url),
            FilterField::Protocol => Cow::Borrowed(&record.protocol),
            FilterField::Status => Cow::Owned(record.status.to_string()),
            FilterField::Referer => Cow::Borrowed(&record.referer),
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("filter field '{0}' given without a pattern")]
    FieldWithoutPattern(FilterField),

    #[error("filter pattern '{0}' given without a field")]
    PatternWithoutField(String),
}

/// Time window plus an optional single-field pattern.
///
/// Both time bounds are exclusive. A field selector and its pattern are
/// always present together; [`FilterCriteria::new`] refuses anything else.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    from: Option<DateTime<FixedOffset>>,
    to: Option<DateTime<FixedOffset>>,
    field_match: Option<(FilterField, Regex)>,
}

impl FilterCriteria {
    pub fn new(
        from: Option<DateTime<FixedOffset>>,
        to: Option<DateTime<FixedOffset>>,
        field: Option<FilterField>,
        pattern: Option<Regex>,
    ) -> Result<Self, FilterError> {
        let field_match = match (field, pattern) {
            (Some(field), Some(pattern)) => Some((field, pattern)),
            (None, None) => None,
            (Some(field), None) => return Err(FilterError::FieldWithoutPattern(field)),
            (None, Some(pattern)) => {
                return Err(FilterError::PatternWithoutField(pattern.as_str().to_string()));
            }
        };

        Ok(Self { from, to, field_match })
    }

    /// Criteria that lets every record through
    pub fn pass_all() -> Self {
        Self::default()
    }

    pub fn from(&self) -> Option<DateTime<FixedOffset>> {
        self.from
    }

    pub fn to(&self) -> Option<DateTime<FixedOffset>> {
        self.to
    }

    pub fn field(&self) -> Option<FilterField> {
        self.field_match.as_ref().map(|(field, _)| *field)
    }

    fn in_window(&self, record: &LogRecord) -> bool {
        let after_from = self.from.is_none_or(|from| record.time_local > from);
        let before_to = self.to.is_none_or(|to| record.time_local < to);
        after_from && before_to
    }

    fn field_matches(&self, record: &LogRecord) -> bool {
        match &self.field_match {
            None => true,
            Some((field, pattern)) => pattern.is_match(&field.value_of(record)),
        }
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        self.field_matches(record) && self.in_window(record)
    }
}

/// Keep the records that satisfy `criteria`, in input order
pub fn filter_records(records: &[LogRecord], criteria: &FilterCriteria) -> Vec<LogRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
