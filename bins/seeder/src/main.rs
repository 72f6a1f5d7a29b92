//! Database seeder for Procura development and testing.
//!
//! Seeds one open purchase order together with an inbound shipment, a goods
//! receipt and an AP invoice, so the open-lines endpoint has something to
//! reconcile.
//!
//! Expected open quantities after seeding:
//! - line 10: 30 (received 100, invoiced 70 against the receipt)
//! - line 20: 20 (30 of 50 shipped, nothing received)
//! - line 30: 12.5 (untouched)
//!
//! Usage: cargo run --bin seeder

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::str::FromStr;
use uuid::Uuid;
use procura_db::entities::{
    ap_invoice_lines, ap_invoices, goods_receipt_confirmations, goods_receipt_lines,
    goods_receipts, inbound_lines, inbounds, purchase_order_lines, purchase_orders,
    sea_orm_active_enums::{
        ApprovalStatus, GoodsReceiptStatus, InboundStatus, PaymentStatus, PurchaseOrderStatus,
    },
};

const PO_CODE: &str = "PO-DEMO-001";
const INBOUND_CODE: &str = "IB-DEMO-001";
const RECEIPT_CODE: &str = "GR-DEMO-001";
const INVOICE_CODE: &str = "AP-DEMO-001";
const SUPPLIER_CODE: &str = "SUP-ACME";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = procura_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    if purchase_orders::Entity::find()
        .filter(purchase_orders::Column::Code.eq(PO_CODE))
        .one(&db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo purchase order already exists, skipping...");
        return;
    }

    println!("Seeding purchase order...");
    seed_purchase_order(&db).await;

    println!("Seeding inbound shipment...");
    seed_inbound(&db).await;

    println!("Seeding goods receipt...");
    seed_goods_receipt(&db).await;

    println!("Seeding AP invoice...");
    seed_ap_invoice(&db).await;

    println!("Seeding complete!");
}

fn qty(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seeds the demo purchase order with three lines.
async fn seed_purchase_order(db: &DatabaseConnection) {
    let po_id = Uuid::new_v4();
    let po = purchase_orders::ActiveModel {
        id: Set(po_id),
        code: Set(PO_CODE.to_string()),
        supplier_code: Set(SUPPLIER_CODE.to_string()),
        supplier_name: Set("Acme Industrial Supply".to_string()),
        order_date: Set(date(2026, 9, 1)),
        status: Set(PurchaseOrderStatus::Open),
        approval_status: Set(ApprovalStatus::Approved),
        payment_status: Set(PaymentStatus::Partial),
        currency: Set("USD".to_string()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };
    if let Err(e) = po.insert(db).await {
        eprintln!("Failed to insert purchase order: {e}");
        return;
    }

    let lines = [
        ("10", "BOLT-M8", "Hex bolt M8x40", "100", "PCS", "0.3500"),
        ("20", "NUT-M8", "Hex nut M8", "50", "PCS", "0.1200"),
        ("30", "OIL-5L", "Cutting oil", "12.5", "L", "4.9000"),
    ];
    for (item, product_code, product_name, ordered, unit, price) in lines {
        let line = purchase_order_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            purchase_order_id: Set(po_id),
            item: Set(item.to_string()),
            product_code: Set(product_code.to_string()),
            product_name: Set(product_name.to_string()),
            qty: Set(qty(ordered)),
            unit_code: Set(unit.to_string()),
            unit_price: Set(qty(price)),
        };
        if let Err(e) = line.insert(db).await {
            eprintln!("Failed to insert purchase order line {item}: {e}");
        } else {
            println!("  Created {PO_CODE}/{item}: {ordered} {unit} of {product_code}");
        }
    }
}

/// Seeds a pending inbound covering lines 10 and 20.
async fn seed_inbound(db: &DatabaseConnection) {
    let inbound_id = Uuid::new_v4();
    let inbound = inbounds::ActiveModel {
        id: Set(inbound_id),
        code: Set(INBOUND_CODE.to_string()),
        status: Set(InboundStatus::Pending),
        shipped_on: Set(Some(date(2026, 9, 10))),
        created_at: Set(Utc::now().into()),
    };
    if let Err(e) = inbound.insert(db).await {
        eprintln!("Failed to insert inbound: {e}");
        return;
    }

    for (item, po_item, shipped) in [("1", "10", "100"), ("2", "20", "30")] {
        let line = inbound_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            inbound_id: Set(inbound_id),
            item: Set(item.to_string()),
            po_code: Set(PO_CODE.to_string()),
            po_item: Set(po_item.to_string()),
            qty: Set(qty(shipped)),
            unit_code: Set("PCS".to_string()),
        };
        if let Err(e) = line.insert(db).await {
            eprintln!("Failed to insert inbound line {item}: {e}");
        } else {
            println!("  Created {INBOUND_CODE}/{item}: {shipped} against {PO_CODE}/{po_item}");
        }
    }
}

/// Seeds a completed goods receipt for inbound line 1, confirmed in two counts.
async fn seed_goods_receipt(db: &DatabaseConnection) {
    let receipt_id = Uuid::new_v4();
    let receipt = goods_receipts::ActiveModel {
        id: Set(receipt_id),
        code: Set(RECEIPT_CODE.to_string()),
        status: Set(GoodsReceiptStatus::Completed),
        received_on: Set(Some(date(2026, 9, 14))),
        created_at: Set(Utc::now().into()),
    };
    if let Err(e) = receipt.insert(db).await {
        eprintln!("Failed to insert goods receipt: {e}");
        return;
    }

    let line_id = Uuid::new_v4();
    let line = goods_receipt_lines::ActiveModel {
        id: Set(line_id),
        goods_receipt_id: Set(receipt_id),
        item: Set("1".to_string()),
        inbound_code: Set(INBOUND_CODE.to_string()),
        inbound_item: Set("1".to_string()),
        unit_code: Set("PCS".to_string()),
    };
    if let Err(e) = line.insert(db).await {
        eprintln!("Failed to insert goods receipt line: {e}");
        return;
    }

    for counted in ["60", "40"] {
        let confirmation = goods_receipt_confirmations::ActiveModel {
            id: Set(Uuid::new_v4()),
            goods_receipt_line_id: Set(line_id),
            qty: Set(qty(counted)),
            confirmed_at: Set(Utc::now().into()),
        };
        if let Err(e) = confirmation.insert(db).await {
            eprintln!("Failed to insert confirmation: {e}");
        } else {
            println!("  Confirmed {counted} on {RECEIPT_CODE}/1");
        }
    }
}

/// Seeds an AP invoice for 70 of line 10, matched to the goods receipt.
async fn seed_ap_invoice(db: &DatabaseConnection) {
    let invoice_id = Uuid::new_v4();
    let invoice = ap_invoices::ActiveModel {
        id: Set(invoice_id),
        code: Set(INVOICE_CODE.to_string()),
        supplier_code: Set(SUPPLIER_CODE.to_string()),
        invoice_date: Set(date(2026, 9, 20)),
        created_at: Set(Utc::now().into()),
    };
    if let Err(e) = invoice.insert(db).await {
        eprintln!("Failed to insert AP invoice: {e}");
        return;
    }

    let line = ap_invoice_lines::ActiveModel {
        id: Set(Uuid::new_v4()),
        ap_invoice_id: Set(invoice_id),
        item: Set("1".to_string()),
        po_code: Set(PO_CODE.to_string()),
        po_item: Set("10".to_string()),
        receipt_code: Set(Some(RECEIPT_CODE.to_string())),
        receipt_item: Set(Some("1".to_string())),
        qty: Set(qty("70")),
        unit_code: Set("PCS".to_string()),
    };
    if let Err(e) = line.insert(db).await {
        eprintln!("Failed to insert AP invoice line: {e}");
    } else {
        println!("  Created {INVOICE_CODE}/1: 70 against {RECEIPT_CODE}/1");
    }
}
