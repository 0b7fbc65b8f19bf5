use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("No business days between {from} and {to}")]
    NoBusinessDays { from: NaiveDate, to: NaiveDate },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
