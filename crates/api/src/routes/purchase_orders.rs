//! Purchase order routes.
//!
//! Serves the open-lines view: every line of the requested page of open
//! purchase orders with its remaining quantity.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::AppState;
use procura_core::fulfillment::{
    ApprovalStatus, FulfillmentService, LineRemainder, OpenLineRow, OpenLinesFilter, PaymentStatus,
};
use procura_db::{
    ApInvoiceRepository, GoodsReceiptRepository, InboundRepository, PurchaseOrderRepository,
};
use procura_shared::{
    AppError,
    types::{PageMeta, PageRequest, PageResponse},
};

/// Creates the purchase order routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/purchase-orders/open-lines", get(list_open_lines))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the open-lines view.
#[derive(Debug, Default, Deserialize)]
pub struct OpenLinesQuery {
    /// PO codes to include (comma-separated).
    pub po_codes: Option<String>,
    /// Supplier codes to include (comma-separated).
    pub supplier_codes: Option<String>,
    /// Approval status filter.
    pub approval_status: Option<String>,
    /// Payment status filter.
    pub payment_status: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Purchase orders per page.
    pub per_page: Option<u32>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for the open-lines view.
#[derive(Debug, Serialize)]
pub struct OpenLinesResponse {
    /// One row per PO line.
    pub data: Vec<OpenLineResponse>,
    /// Pagination over purchase orders.
    pub meta: PageMeta,
}

/// One PO line with its remaining quantity.
#[derive(Debug, Serialize)]
pub struct OpenLineResponse {
    /// PO code.
    pub po_code: String,
    /// Supplier code.
    pub supplier_code: String,
    /// Supplier name.
    pub supplier_name: String,
    /// Order date (YYYY-MM-DD).
    pub order_date: String,
    /// Approval status.
    pub approval_status: &'static str,
    /// Payment status.
    pub payment_status: &'static str,
    /// Currency code.
    pub currency: String,
    /// PO line item.
    pub item: String,
    /// Product code.
    pub product_code: String,
    /// Product name.
    pub product_name: String,
    /// Ordered quantity.
    pub ordered_qty: String,
    /// Unit of measure.
    pub unit_code: String,
    /// Unit price.
    pub unit_price: String,
    /// Remaining open quantity.
    pub remain_qty: String,
    /// Terms of the remainder formula.
    pub breakdown: Option<BreakdownResponse>,
}

/// Terms of `remain = ordered - invoiced - inbound + receipt_surplus`.
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    /// Ordered quantity.
    pub ordered: String,
    /// Quantity shipped on open inbounds.
    pub inbound: String,
    /// AP quantity not already netted against a goods receipt.
    pub invoiced: String,
    /// Received quantity not yet invoiced.
    pub receipt_surplus: String,
}

impl From<PageResponse<OpenLineRow>> for OpenLinesResponse {
    fn from(page: PageResponse<OpenLineRow>) -> Self {
        Self {
            data: page.data.into_iter().map(OpenLineResponse::from).collect(),
            meta: page.meta,
        }
    }
}

impl From<OpenLineRow> for OpenLineResponse {
    fn from(row: OpenLineRow) -> Self {
        Self {
            po_code: row.po_code,
            supplier_code: row.supplier_code,
            supplier_name: row.supplier_name,
            order_date: row.order_date.to_string(),
            approval_status: row.approval_status.as_str(),
            payment_status: row.payment_status.as_str(),
            currency: row.currency,
            item: row.item,
            product_code: row.product_code,
            product_name: row.product_name,
            ordered_qty: format_qty(row.ordered_qty),
            unit_code: row.unit_code,
            unit_price: format_qty(row.unit_price),
            remain_qty: format_qty(row.remain_qty),
            breakdown: row.breakdown.as_ref().map(breakdown_to_response),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Formats a Decimal as a string with 4 decimal places.
fn format_qty(qty: Decimal) -> String {
    format!("{qty:.4}")
}

fn breakdown_to_response(line: &LineRemainder) -> BreakdownResponse {
    BreakdownResponse {
        ordered: format_qty(line.ordered),
        inbound: format_qty(line.inbound),
        invoiced: format_qty(line.invoiced),
        receipt_surplus: format_qty(line.receipt_surplus),
    }
}

/// Parses a comma-separated list, dropping blank entries.
fn parse_code_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Parses approval status from string.
fn parse_approval_status(s: &str) -> Option<ApprovalStatus> {
    match s.to_lowercase().as_str() {
        "pending" => Some(ApprovalStatus::Pending),
        "approved" => Some(ApprovalStatus::Approved),
        "rejected" => Some(ApprovalStatus::Rejected),
        _ => None,
    }
}

/// Parses payment status from string.
fn parse_payment_status(s: &str) -> Option<PaymentStatus> {
    match s.to_lowercase().as_str() {
        "unpaid" => Some(PaymentStatus::Unpaid),
        "partial" => Some(PaymentStatus::Partial),
        "paid" => Some(PaymentStatus::Paid),
        _ => None,
    }
}

/// Builds the engine filter, capping the page size at `max_per_page`.
fn build_filter(query: &OpenLinesQuery, max_per_page: u32) -> Result<OpenLinesFilter, AppError> {
    let approval_status = match query.approval_status.as_deref() {
        None | Some("") => None,
        Some(s) => Some(parse_approval_status(s).ok_or_else(|| {
            AppError::Validation(format!("Unknown approval_status '{s}'"))
        })?),
    };
    let payment_status = match query.payment_status.as_deref() {
        None | Some("") => None,
        Some(s) => Some(parse_payment_status(s).ok_or_else(|| {
            AppError::Validation(format!("Unknown payment_status '{s}'"))
        })?),
    };
    let defaults = PageRequest::default();
    let page = PageRequest::new(
        query.page.unwrap_or(defaults.page),
        query.per_page.unwrap_or(defaults.per_page),
    )
    .clamped(max_per_page);

    Ok(OpenLinesFilter {
        po_codes: query.po_codes.as_deref().map(parse_code_list).unwrap_or_default(),
        supplier_codes: query
            .supplier_codes
            .as_deref()
            .map(parse_code_list)
            .unwrap_or_default(),
        approval_status,
        payment_status,
        page,
    })
}

fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.public_message()
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /purchase-orders/open-lines
async fn list_open_lines(
    State(state): State<AppState>,
    Query(query): Query<OpenLinesQuery>,
) -> impl IntoResponse {
    let filter = match build_filter(&query, state.reconciliation.max_per_page) {
        Ok(filter) => filter,
        Err(e) => return error_response(&e),
    };

    let service = FulfillmentService::new(
        Arc::new(PurchaseOrderRepository::new((*state.db).clone())),
        Arc::new(InboundRepository::new((*state.db).clone())),
        Arc::new(GoodsReceiptRepository::new((*state.db).clone())),
        Arc::new(ApInvoiceRepository::new((*state.db).clone())),
    )
    .with_concurrent_branches(state.reconciliation.concurrent_branches);

    match service.open_lines(&filter).await {
        Ok(page) => (StatusCode::OK, Json(OpenLinesResponse::from(page))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to reconcile open purchase order lines");
            error_response(&AppError::from(e))
        }
    }
}
