//! Composite keys used to join documents across stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one document line: a document code plus a line item code.
///
/// Used for PO lines, inbound lines, goods receipt lines and invoice lines alike.
/// Ordering is by code, then item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey {
    /// Document code (e.g. PO number).
    pub code: String,
    /// Line item code within the document.
    pub item: String,
}

impl LineKey {
    /// Creates a key from a code and an item.
    #[must_use]
    pub fn new(code: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            item: item.into(),
        }
    }

    /// Creates a key only when both parts are non-blank.
    ///
    /// Upstream rows leave reference columns empty when the line they point at
    /// is unknown. Such references cannot be attributed and are represented as
    /// `None` rather than as a key that would never match. Non-blank parts are
    /// kept verbatim so they join keys built with [`LineKey::new`].
    #[must_use]
    pub fn from_parts(code: &str, item: &str) -> Option<Self> {
        if code.trim().is_empty() || item.trim().is_empty() {
            return None;
        }
        Some(Self::new(code, item))
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.code, self.item)
    }
}

/// One PO line paired with one goods receipt line.
///
/// This is the unit of double-counting prevention: an AP quantity invoiced
/// against a receipt line that was already reconciled for the same PO line is
/// not subtracted a second time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairingKey {
    /// The purchase order line.
    pub po_line: LineKey,
    /// The goods receipt line.
    pub receipt_line: LineKey,
}

impl PairingKey {
    /// Pairs a PO line with a goods receipt line.
    #[must_use]
    pub const fn new(po_line: LineKey, receipt_line: LineKey) -> Self {
        Self {
            po_line,
            receipt_line,
        }
    }
}

impl fmt::Display for PairingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.po_line, self.receipt_line)
    }
}
