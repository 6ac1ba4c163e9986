use thiserror::Error;

use super::catalog::ProductRef;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Product {0} could not be resolved")]
    ReferenceResolution(ProductRef),
    #[error("Category '{0}' has no product type mapping")]
    UnmappedCategory(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
