//! `SeaORM` entities for the fulfillment tables.

pub mod ap_invoice_lines;
pub mod ap_invoices;
pub mod goods_receipt_confirmations;
pub mod goods_receipt_lines;
pub mod goods_receipts;
pub mod inbound_lines;
pub mod inbounds;
pub mod purchase_order_lines;
pub mod purchase_orders;
pub mod sea_orm_active_enums;
