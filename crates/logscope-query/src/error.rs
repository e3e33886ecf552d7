use thiserror::Error;

/// Query failures surfaced to the caller
#[derive(Debug, Error)]
pub enum QueryError {
    /// A time bound did not match the expected grammar
    #[error("invalid time bound {value:?}, use 'YYYY-MM-DD HH:MM:SS'")]
    InvalidTimeBound { value: String },

    /// No record with the given id
    #[error("no record with id {id:?}")]
    NotFound { id: String },
}
