use store::StoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart not found: {0}")]
    CartNotFound(Uuid),

    #[error("Cannot place an order from empty cart {0}")]
    EmptyCart(Uuid),

    /// A store write failed after order placement started mutating state.
    /// Distinct from the clean rejections above, which have no side effects.
    #[error("Order placement failed during {stage}: {source}")]
    TransactionFailure {
        stage: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
