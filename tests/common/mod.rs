//! Shared test utilities for sheetplace integration tests.
//!
//! Test crates import this via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use sheetplace::{Document, TransactionStatus};

/// Name of the sheet the default command looks for.
pub const SHEET_NAME: &str = "My First Sheet";

/// Name of the view the default command looks for.
pub const VIEW_NAME: &str = "Our first plan!";

/// Number of transactions in the history that ended with `status`.
pub fn count_transactions(doc: &Document, status: TransactionStatus) -> usize {
    doc.transaction_history()
        .iter()
        .filter(|record| record.status == status)
        .count()
}
