//! Error types for sheetplace

use crate::entities::Category;
use crate::types::Handle;
use thiserror::Error;

/// Main error type for document operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    /// A named lookup found no entity in the requested category
    #[error("{} '{name}' not found", .category.singular())]
    NotFound { category: Category, name: String },

    /// Transaction could not be started, used or committed
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Handle does not refer to a live entity
    #[error("Object not found: handle {0}")]
    ObjectNotFound(Handle),

    /// Entity exists but is not of the expected kind
    #[error("Entity {handle} is not a {expected}")]
    WrongCategory { handle: Handle, expected: &'static str },

    /// The view cannot be placed on the sheet
    #[error("View '{view}' cannot be added to sheet '{sheet}': {reason}")]
    Placement {
        view: String,
        sheet: String,
        reason: PlacementRefusal,
    },

    /// Geometry that cannot be placed (NaN or infinite coordinates)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Anything else that went wrong while mutating the document
    #[error("{0}")]
    Unexpected(String),
}

/// Why a view was refused by a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementRefusal {
    #[error("the view is already placed on a sheet")]
    AlreadyPlaced,
    #[error("view templates cannot be placed")]
    Template,
    #[error("placeholder sheets cannot host views")]
    PlaceholderSheet,
}

/// Errors raised by the transaction guard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Another editor holds the mutation lease
    #[error("Cannot start transaction '{name}': document is being modified by '{holder}'")]
    DocumentLocked { name: String, holder: String },

    #[error("Cannot start transaction '{0}': document is read-only")]
    ReadOnly(String),

    /// Direct edit refused because the document is locked or read-only
    #[error("Document is not modifiable: {0}")]
    NotModifiable(String),

    /// The transaction name must be non-empty
    #[error("Transaction name cannot be empty")]
    EmptyName,

    /// Operation requires a different transaction state
    #[error("Transaction '{name}' is {status}, expected {expected}")]
    InvalidState {
        name: String,
        status: crate::transaction::TransactionStatus,
        expected: crate::transaction::TransactionStatus,
    },

    /// Commit-time validation rejected the changes; they were rolled back
    #[error("Transaction '{name}' failed to commit: {reason}")]
    CommitFailed { name: String, reason: String },
}

/// Result type alias for sheetplace operations
pub type Result<T> = std::result::Result<T, SheetError>;

impl From<String> for SheetError {
    fn from(s: String) -> Self {
        SheetError::Unexpected(s)
    }
}

impl From<&str> for SheetError {
    fn from(s: &str) -> Self {
        SheetError::Unexpected(s.to_string())
    }
}

impl SheetError {
    /// Lookup miss, as opposed to a failure while mutating
    pub fn is_not_found(&self) -> bool {
        matches!(self, SheetError::NotFound { .. })
    }
}
