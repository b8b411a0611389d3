use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown priority: {0:?}")]
    Priority(String),

    #[error("unknown status: {0:?}")]
    Status(String),

    #[error("unknown department: {0:?}")]
    Department(String),
}
