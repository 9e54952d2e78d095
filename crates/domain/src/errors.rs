use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Line item quantity must be at least 1")]
    InvalidQuantity,

    #[error("Line item unit price must be positive")]
    InvalidPrice,

    #[error("Review rating {0} is outside the 1..=5 range")]
    InvalidRating(u8),
}
