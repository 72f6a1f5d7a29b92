//! Initial database migration.
//!
//! Creates the purchase order, inbound, goods receipt and AP invoice tables
//! the open-lines reconciliation reads from.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: PURCHASE ORDERS
        // ============================================================
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDER_LINES_SQL).await?;

        // ============================================================
        // PART 3: INBOUND SHIPMENTS
        // ============================================================
        db.execute_unprepared(INBOUNDS_SQL).await?;

        // ============================================================
        // PART 4: GOODS RECEIPTS
        // ============================================================
        db.execute_unprepared(GOODS_RECEIPTS_SQL).await?;

        // ============================================================
        // PART 5: AP INVOICES
        // ============================================================
        db.execute_unprepared(AP_INVOICES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE purchase_order_status AS ENUM ('open', 'closed', 'cancelled');
CREATE TYPE approval_status AS ENUM ('pending', 'approved', 'rejected');
CREATE TYPE payment_status AS ENUM ('unpaid', 'partial', 'paid');
CREATE TYPE inbound_status AS ENUM ('pending', 'completed', 'cancelled');
CREATE TYPE goods_receipt_status AS ENUM ('draft', 'completed', 'cancelled');
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL UNIQUE,
    supplier_code VARCHAR(50) NOT NULL,
    supplier_name VARCHAR(255) NOT NULL,
    order_date DATE NOT NULL,
    status purchase_order_status NOT NULL DEFAULT 'open',
    approval_status approval_status NOT NULL DEFAULT 'pending',
    payment_status payment_status NOT NULL DEFAULT 'unpaid',
    currency CHAR(3) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_purchase_orders_open ON purchase_orders(code) WHERE status = 'open';
CREATE INDEX idx_purchase_orders_supplier ON purchase_orders(supplier_code);
";

const PURCHASE_ORDER_LINES_SQL: &str = r"
CREATE TABLE purchase_order_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders(id) ON DELETE CASCADE,
    item VARCHAR(20) NOT NULL,
    product_code VARCHAR(50) NOT NULL,
    product_name VARCHAR(255) NOT NULL,
    qty NUMERIC(19, 4) NOT NULL,
    unit_code VARCHAR(20) NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    CONSTRAINT uq_purchase_order_lines_item UNIQUE (purchase_order_id, item),
    CONSTRAINT chk_purchase_order_lines_qty CHECK (qty >= 0)
);
";

const INBOUNDS_SQL: &str = r"
CREATE TABLE inbounds (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL UNIQUE,
    status inbound_status NOT NULL DEFAULT 'pending',
    shipped_on DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE inbound_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    inbound_id UUID NOT NULL REFERENCES inbounds(id) ON DELETE CASCADE,
    item VARCHAR(20) NOT NULL,
    po_code VARCHAR(50) NOT NULL,
    po_item VARCHAR(20) NOT NULL,
    qty NUMERIC(19, 4) NOT NULL,
    unit_code VARCHAR(20) NOT NULL,
    CONSTRAINT uq_inbound_lines_item UNIQUE (inbound_id, item)
);

-- Lookup by referenced PO line
CREATE INDEX idx_inbound_lines_po ON inbound_lines(po_code, po_item);
";

const GOODS_RECEIPTS_SQL: &str = r"
CREATE TABLE goods_receipts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL UNIQUE,
    status goods_receipt_status NOT NULL DEFAULT 'draft',
    received_on DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE goods_receipt_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    goods_receipt_id UUID NOT NULL REFERENCES goods_receipts(id) ON DELETE CASCADE,
    item VARCHAR(20) NOT NULL,
    inbound_code VARCHAR(50) NOT NULL,
    inbound_item VARCHAR(20) NOT NULL,
    unit_code VARCHAR(20) NOT NULL,
    CONSTRAINT uq_goods_receipt_lines_item UNIQUE (goods_receipt_id, item)
);

-- Lookup by referenced inbound line
CREATE INDEX idx_goods_receipt_lines_inbound ON goods_receipt_lines(inbound_code, inbound_item);

-- A receipt line is confirmed in one or more counts
CREATE TABLE goods_receipt_confirmations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    goods_receipt_line_id UUID NOT NULL REFERENCES goods_receipt_lines(id) ON DELETE CASCADE,
    qty NUMERIC(19, 4) NOT NULL,
    confirmed_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_goods_receipt_confirmations_line ON goods_receipt_confirmations(goods_receipt_line_id);
";

const AP_INVOICES_SQL: &str = r"
CREATE TABLE ap_invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL UNIQUE,
    supplier_code VARCHAR(50) NOT NULL,
    invoice_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE ap_invoice_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    ap_invoice_id UUID NOT NULL REFERENCES ap_invoices(id) ON DELETE CASCADE,
    item VARCHAR(20) NOT NULL,
    po_code VARCHAR(50) NOT NULL,
    po_item VARCHAR(20) NOT NULL,
    receipt_code VARCHAR(50),
    receipt_item VARCHAR(20),
    qty NUMERIC(19, 4) NOT NULL,
    unit_code VARCHAR(20) NOT NULL,
    CONSTRAINT uq_ap_invoice_lines_item UNIQUE (ap_invoice_id, item)
);

CREATE INDEX idx_ap_invoice_lines_po ON ap_invoice_lines(po_code, po_item);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS ap_invoice_lines CASCADE;
DROP TABLE IF EXISTS ap_invoices CASCADE;
DROP TABLE IF EXISTS goods_receipt_confirmations CASCADE;
DROP TABLE IF EXISTS goods_receipt_lines CASCADE;
DROP TABLE IF EXISTS goods_receipts CASCADE;
DROP TABLE IF EXISTS inbound_lines CASCADE;
DROP TABLE IF EXISTS inbounds CASCADE;
DROP TABLE IF EXISTS purchase_order_lines CASCADE;
DROP TABLE IF EXISTS purchase_orders CASCADE;

DROP TYPE IF EXISTS goods_receipt_status CASCADE;
DROP TYPE IF EXISTS inbound_status CASCADE;
DROP TYPE IF EXISTS payment_status CASCADE;
DROP TYPE IF EXISTS approval_status CASCADE;
DROP TYPE IF EXISTS purchase_order_status CASCADE;
";
