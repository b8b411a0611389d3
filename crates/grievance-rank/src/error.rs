use grievance_core::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("unknown sort key: {0:?}")]
    UnknownSortKey(String),

    #[error(transparent)]
    Label(#[from] ParseError),
}
