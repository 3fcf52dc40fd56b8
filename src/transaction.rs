//! Scoped, all-or-nothing document transactions
//!
//! A [`Transaction`] borrows its [`Document`] mutably for as long as it
//! exists, which makes it the only writer in the process. Starting it also
//! takes the document's mutation lease, so a document locked by an outside
//! editor refuses to start a transaction instead of waiting.
//!
//! ```rust,ignore
//! let mut tx = Transaction::new(&mut doc, "Place View");
//! tx.start()?;
//! tx.document_mut()?.place_view(sheet, view, anchor)?;
//! tx.commit()?;
//! ```
//!
//! Every exit path ends in a terminal state: `commit` and `rollback` consume
//! the guard, and dropping a guard that is still active rolls it back.

use crate::document::{Document, DocumentSnapshot};
use crate::error::TransactionError;
use crate::notification::{Notification, NotificationType};
use std::fmt;

/// Lifecycle of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Created, not started
    Inactive,
    /// Started; the document may be edited
    Active,
    /// Changes kept
    Committed,
    /// Changes discarded
    RolledBack,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Active => write!(f, "active"),
            Self::Committed => write!(f, "committed"),
            Self::RolledBack => write!(f, "rolled back"),
        }
    }
}

/// Outcome of a finished transaction, kept in the document's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub name: String,
    /// Always terminal
    pub status: TransactionStatus,
    /// Why the transaction was rolled back
    pub reason: Option<String>,
}

/// Guard over one atomic set of document changes
pub struct Transaction<'a> {
    document: &'a mut Document,
    name: String,
    status: TransactionStatus,
    snapshot: Option<DocumentSnapshot>,
}

impl<'a> Transaction<'a> {
    /// Create an inactive transaction
    pub fn new(document: &'a mut Document, name: impl Into<String>) -> Self {
        Transaction {
            document,
            name: name.into(),
            status: TransactionStatus::Inactive,
            snapshot: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Take the mutation lease and remember the state to roll back to
    ///
    /// Fails immediately when the document is read-only or locked.
    pub fn start(&mut self) -> Result<TransactionStatus, TransactionError> {
        self.expect(TransactionStatus::Inactive)?;
        if self.name.trim().is_empty() {
            return Err(TransactionError::EmptyName);
        }
        self.document.acquire_lease(&self.name)?;
        self.snapshot = Some(self.document.snapshot());
        self.status = TransactionStatus::Active;
        tracing::info!(transaction = %self.name, "transaction started");
        Ok(self.status)
    }

    /// Read access to the document in any state
    pub fn document(&self) -> &Document {
        &*self.document
    }

    /// Write access to the document, only while active
    pub fn document_mut(&mut self) -> Result<&mut Document, TransactionError> {
        self.expect(TransactionStatus::Active)?;
        Ok(&mut *self.document)
    }

    /// Keep the changes
    ///
    /// The document is validated first; if validation fails the changes are
    /// rolled back and [`TransactionError::CommitFailed`] is returned.
    pub fn commit(mut self) -> Result<TransactionStatus, TransactionError> {
        self.expect(TransactionStatus::Active)?;

        if let Err(reason) = self.document.validate() {
            self.finish_rolled_back(&reason);
            return Err(TransactionError::CommitFailed {
                name: self.name.clone(),
                reason,
            });
        }

        self.snapshot = None;
        self.status = TransactionStatus::Committed;
        self.document.release_lease();
        self.document.record_transaction(TransactionRecord {
            name: self.name.clone(),
            status: TransactionStatus::Committed,
            reason: None,
        });
        tracing::info!(transaction = %self.name, "transaction committed");
        Ok(self.status)
    }

    /// Discard the changes
    pub fn rollback(self) -> Result<TransactionStatus, TransactionError> {
        self.rollback_with_reason("rolled back by caller")
    }

    /// Discard the changes, recording why in the document's history
    pub fn rollback_with_reason(mut self, reason: &str) -> Result<TransactionStatus, TransactionError> {
        self.expect(TransactionStatus::Active)?;
        self.finish_rolled_back(reason);
        Ok(self.status)
    }

    fn expect(&self, expected: TransactionStatus) -> Result<(), TransactionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TransactionError::InvalidState {
                name: self.name.clone(),
                status: self.status,
                expected,
            })
        }
    }

    fn finish_rolled_back(&mut self, reason: &str) {
        if let Some(snapshot) = self.snapshot.take() {
            self.document.restore(snapshot);
        }
        self.status = TransactionStatus::RolledBack;
        self.document.release_lease();
        self.document.record_transaction(TransactionRecord {
            name: self.name.clone(),
            status: TransactionStatus::RolledBack,
            reason: Some(reason.to_string()),
        });
        self.document.notifications.push(Notification::new(
            NotificationType::Error,
            format!("Transaction '{}' rolled back: {reason}", self.name),
        ));
        tracing::warn!(transaction = %self.name, %reason, "transaction rolled back");
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.status == TransactionStatus::Active {
            self.finish_rolled_back("transaction was not committed");
        }
    }
}

impl fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("name", &self.name)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityType, Sheet, View, ViewType, Viewport};
    use crate::types::{Handle, Outline, Vector2};

    fn document() -> (Document, Handle, Handle) {
        let mut doc = Document::new("Project");
        let sheet = doc.add_entity(Sheet::new("A101", "My First Sheet")).unwrap();
        let view = doc
            .add_entity(View::new(
                "Our first plan!",
                ViewType::FloorPlan,
                Outline::rectangle(Vector2::ZERO, Vector2::new(100.0, 100.0)),
            ))
            .unwrap();
        (doc, sheet, view)
    }

    #[test]
    fn test_lifecycle_commit() {
        let (mut doc, sheet, view) = document();
        let mut tx = Transaction::new(&mut doc, "Place View");
        assert_eq!(tx.status(), TransactionStatus::Inactive);
        assert!(tx.document_mut().is_err());

        assert_eq!(tx.start().unwrap(), TransactionStatus::Active);
        assert!(tx.document().is_modifiable());
        tx.document_mut()
            .unwrap()
            .place_view(sheet, view, Vector2::new(1.0, 1.0))
            .unwrap();
        assert_eq!(tx.commit().unwrap(), TransactionStatus::Committed);

        assert!(!doc.is_modifiable());
        assert_eq!(doc.viewports().count(), 1);
        assert_eq!(
            doc.transaction_history(),
            &[TransactionRecord {
                name: "Place View".into(),
                status: TransactionStatus::Committed,
                reason: None,
            }]
        );
    }

    #[test]
    fn test_explicit_rollback_restores_state() {
        let (mut doc, sheet, view) = document();
        let before = doc.snapshot();

        let mut tx = Transaction::new(&mut doc, "Place View");
        tx.start().unwrap();
        tx.document_mut().unwrap().place_view(sheet, view, Vector2::ZERO).unwrap();
        tx.document_mut().unwrap().add_entity(Sheet::new("A102", "Extra")).unwrap();
        assert_eq!(tx.rollback().unwrap(), TransactionStatus::RolledBack);

        assert_eq!(doc.snapshot(), before);
        assert_eq!(doc.transaction_history()[0].status, TransactionStatus::RolledBack);
        assert!(doc.notifications.has_type(NotificationType::Error));
    }

    #[test]
    fn test_drop_while_active_rolls_back() {
        let (mut doc, sheet, view) = document();
        let before = doc.snapshot();
        {
            let mut tx = Transaction::new(&mut doc, "Place View");
            tx.start().unwrap();
            tx.document_mut().unwrap().place_view(sheet, view, Vector2::ZERO).unwrap();
        }
        assert_eq!(doc.snapshot(), before);
        assert_eq!(doc.lease_holder(), None);
        let record = &doc.transaction_history()[0];
        assert_eq!(record.status, TransactionStatus::RolledBack);
        assert_eq!(record.reason.as_deref(), Some("transaction was not committed"));
    }

    #[test]
    fn test_drop_unstarted_records_nothing() {
        let (mut doc, _, _) = document();
        drop(Transaction::new(&mut doc, "Place View"));
        assert!(doc.transaction_history().is_empty());
    }

    #[test]
    fn test_start_fails_when_locked() {
        let (mut doc, _, _) = document();
        doc.lock_for_editing("Synchronize with central").unwrap();
        let mut tx = Transaction::new(&mut doc, "Place View");
        let err = tx.start().unwrap_err();
        assert_eq!(
            err,
            TransactionError::DocumentLocked {
                name: "Place View".into(),
                holder: "Synchronize with central".into(),
            }
        );
        assert_eq!(tx.status(), TransactionStatus::Inactive);
    }

    #[test]
    fn test_start_fails_when_read_only() {
        let (mut doc, _, _) = document();
        doc.set_read_only(true);
        let mut tx = Transaction::new(&mut doc, "Place View");
        assert!(matches!(tx.start(), Err(TransactionError::ReadOnly(_))));
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let (mut doc, _, _) = document();
        let mut tx = Transaction::new(&mut doc, "Place View");
        tx.start().unwrap();
        assert!(matches!(tx.start(), Err(TransactionError::InvalidState { .. })));
    }

    #[test]
    fn test_empty_name_rejected() {
        let (mut doc, _, _) = document();
        let mut tx = Transaction::new(&mut doc, "  ");
        assert_eq!(tx.start().unwrap_err(), TransactionError::EmptyName);
    }

    #[test]
    fn test_commit_validation_failure_rolls_back() {
        let (mut doc, _, view) = document();
        let before = doc.snapshot();

        let mut tx = Transaction::new(&mut doc, "Bad Viewport");
        tx.start().unwrap();
        tx.document_mut()
            .unwrap()
            .add_entity(Viewport::new(Handle::new(0x999), view, Vector2::ZERO))
            .unwrap();
        let err = tx.commit().unwrap_err();

        assert!(matches!(err, TransactionError::CommitFailed { .. }));
        assert_eq!(doc.snapshot(), before);
        assert!(doc
            .entities()
            .all(|e| !matches!(e, EntityType::Viewport(_))));
    }

    #[test]
    fn test_commit_inactive_is_invalid() {
        let (mut doc, _, _) = document();
        let tx = Transaction::new(&mut doc, "Place View");
        assert!(matches!(
            tx.commit(),
            Err(TransactionError::InvalidState {
                status: TransactionStatus::Inactive,
                ..
            })
        ));
        assert!(doc.transaction_history().is_empty());
    }
}
