use crate::analyzer::AnalysisError;
use crate::filter::FilterError;
use crate::formatter::RenderError;
use crate::parser::LineParseError;
use crate::saver::SaveError;
use crate::source::SourceError;
use thiserror::Error;

/// Any failure of a run; every one of them ends the run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to parse logs: {0}")]
    Parse(#[from] LineParseError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

pub type Result<T> = std::result::Result<T, Error>;
