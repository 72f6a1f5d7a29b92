//! Fulfillment error types.

use std::fmt;

use procura_shared::AppError;
use thiserror::Error;

/// A document stage of the reconciliation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Purchase orders.
    PurchaseOrder,
    /// Inbound shipments.
    Inbound,
    /// Goods receipts.
    GoodsReceipt,
    /// AP invoices.
    ApInvoice,
}

impl Stage {
    /// Stable name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::Inbound => "inbound",
            Self::GoodsReceipt => "goods_receipt",
            Self::ApInvoice => "ap_invoice",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciliation errors.
///
/// Any of these aborts the whole reconciliation; no partial result is returned.
/// Missing links between documents are not errors.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// A collaborator query failed.
    #[error("{stage} fetch failed: {message}")]
    Fetch {
        /// Stage whose fetch failed.
        stage: Stage,
        /// Underlying failure.
        message: String,
    },

    /// A collaborator returned data that does not fit the expected shape.
    #[error("{stage} returned malformed data: {message}")]
    Shape {
        /// Stage that returned the data.
        stage: Stage,
        /// What did not fit.
        message: String,
    },

    /// The caller's filter cannot be served.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

impl FulfillmentError {
    /// Creates a fetch error.
    pub fn fetch(stage: Stage, message: impl fmt::Display) -> Self {
        Self::Fetch {
            stage,
            message: message.to_string(),
        }
    }

    /// Creates a shape error.
    pub fn shape(stage: Stage, message: impl fmt::Display) -> Self {
        Self::Shape {
            stage,
            message: message.to_string(),
        }
    }

    /// The stage the error came from, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Fetch { stage, .. } | Self::Shape { stage, .. } => Some(*stage),
            Self::InvalidFilter(_) => None,
        }
    }
}

impl From<FulfillmentError> for AppError {
    fn from(err: FulfillmentError) -> Self {
        match err {
            FulfillmentError::Fetch { .. } => Self::Database(err.to_string()),
            FulfillmentError::Shape { .. } => Self::Internal(err.to_string()),
            FulfillmentError::InvalidFilter(msg) => Self::Validation(msg),
        }
    }
}
