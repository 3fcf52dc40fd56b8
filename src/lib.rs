//! # sheetplace
//!
//! Transactional placement of views on sheets in an in-memory design
//! document.
//!
//! A [`Document`] holds sheets (placement surfaces), views (content with an
//! outline) and the viewports that associate the two. [`PlaceViewCommand`]
//! finds a sheet and a view by name, anchors the view at the midpoint of its
//! outline and places it inside a [`Transaction`] that either commits the
//! whole change or leaves the document untouched.
//!
//! ## Quick Start
//!
//! ```rust
//! use sheetplace::{Command, CommandResult, Document, Outline, PlaceViewCommand, Sheet, Vector2, View, ViewType};
//!
//! let mut doc = Document::new("Project");
//! doc.add_entity(Sheet::new("A101", "My First Sheet"))?;
//! doc.add_entity(View::new(
//!     "Our first plan!",
//!     ViewType::FloorPlan,
//!     Outline::rectangle(Vector2::ZERO, Vector2::new(40.0, 20.0)),
//! ))?;
//!
//! let mut message = String::new();
//! let result = PlaceViewCommand::new().execute(&mut doc, &mut message);
//! assert_eq!(result, CommandResult::Succeeded);
//! assert_eq!(doc.viewports().count(), 1);
//! # Ok::<(), sheetplace::SheetError>(())
//! ```
//!
//! ## Architecture
//!
//! - `locator` - category-restricted entity lookup with a lowest-handle
//!   tie-break
//! - `placement` - anchor computation from an outline
//! - `transaction` - scoped guard with snapshot rollback
//! - `command` - the locate, compute, mutate pipeline

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod command;
pub mod document;
pub mod entities;
pub mod error;
pub mod locator;
pub mod logging;
pub mod notification;
pub mod placement;
pub mod transaction;
pub mod types;

// Re-export commonly used types
pub use error::{PlacementRefusal, Result, SheetError, TransactionError};
pub use types::{BoundingBox2D, Handle, Outline, Vector2};

pub use entities::{Category, Entity, EntityType, Sheet, View, ViewType, Viewport};

pub use document::{Document, DocumentSnapshot};
pub use transaction::{Transaction, TransactionRecord, TransactionStatus};

pub use command::{
    AnchorSource, Command, CommandResult, PlaceViewCommand, PlaceViewConfiguration, Placement,
};
pub use locator::{EntityCollector, NameMatch};
pub use placement::compute_anchor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new("Project");
        assert_eq!(doc.title, "Project");
        assert_eq!(doc.entity_count(), 0);
        assert!(doc.transaction_history().is_empty());
    }
}
