//! Core business logic for Procura.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, reconciliation rules, and calculations live here.
//!
//! # Modules
//!
//! - `fulfillment` - Purchase-order fulfillment reconciliation (open quantity per PO line)

pub mod fulfillment;
