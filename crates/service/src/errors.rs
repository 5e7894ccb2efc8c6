use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("missing required input: {0}")]
    MissingInput(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::MissingInput(_) => 2001,
            ServiceError::Validation(_) => 2002,
            ServiceError::NotFound(_) => 2003,
            ServiceError::InvalidArgument(_) => 2004,
            ServiceError::Db(_) => 2100,
            ServiceError::Model(_) => 2101,
        }
    }
}
