//! Repository implementations of the fulfillment query traits.
//!
//! Each repository reads one document stage and maps `SeaORM` errors into
//! [`FulfillmentError`] tagged with that stage.

pub mod ap_invoice;
pub mod goods_receipt;
pub mod inbound;
pub mod purchase_order;

pub use ap_invoice::ApInvoiceRepository;
pub use goods_receipt::GoodsReceiptRepository;
pub use inbound::InboundRepository;
pub use purchase_order::PurchaseOrderRepository;

use procura_core::fulfillment::{FulfillmentError, Stage};
use sea_orm::DbErr;

/// Maps a database error raised while reading `stage`.
///
/// Values that could not be decoded into the entity are shape errors; all
/// other failures are fetch errors.
pub(crate) fn stage_error(stage: Stage, err: &DbErr) -> FulfillmentError {
    match err {
        DbErr::Type(_) | DbErr::TryIntoErr { .. } => FulfillmentError::shape(stage, err),
        _ => FulfillmentError::fetch(stage, err),
    }
}
