//! Test document builders.
//!
//! `sample_document()` is the canonical two-entity document: one sheet named
//! [`SHEET_NAME`] and one floor plan named [`VIEW_NAME`]. The other builders
//! add or leave out pieces of it.

#![allow(dead_code)]

use super::{SHEET_NAME, VIEW_NAME};
use sheetplace::{Document, Handle, Outline, Sheet, Vector2, View, ViewType};

/// A floor plan with a rectangular outline from `min` to `max`.
pub fn plan(name: &str, min: Vector2, max: Vector2) -> View {
    View::new(name, ViewType::FloorPlan, Outline::rectangle(min, max))
}

/// A sample document and the handles of its two entities.
pub struct Sample {
    pub doc: Document,
    pub sheet: Handle,
    pub view: Handle,
}

/// Document with the named sheet and the named view.
pub fn sample_document() -> Sample {
    let mut doc = Document::new("Sample");
    let sheet = doc.add_entity(Sheet::new("A101", SHEET_NAME)).unwrap();
    let view = doc
        .add_entity(plan(VIEW_NAME, Vector2::new(0.0, 0.0), Vector2::new(30000.0, 20000.0)))
        .unwrap();
    Sample { doc, sheet, view }
}

/// Document with the named sheet but no view of the target name.
pub fn document_without_view() -> Document {
    let mut doc = Document::new("No view");
    doc.add_entity(Sheet::new("A101", SHEET_NAME)).unwrap();
    doc.add_entity(plan("Level 2", Vector2::ZERO, Vector2::new(10.0, 10.0)))
        .unwrap();
    doc
}

/// Document with the named view but no sheet of the target name.
pub fn document_without_sheet() -> Document {
    let mut doc = Document::new("No sheet");
    doc.add_entity(Sheet::new("A102", "Another Sheet")).unwrap();
    doc.add_entity(plan(VIEW_NAME, Vector2::ZERO, Vector2::new(10.0, 10.0)))
        .unwrap();
    doc
}

/// Document with `sheets` sheets and `views` views named by index, plus
/// whichever of the two target entities are requested.
pub fn populated_document(sheets: usize, views: usize, with_sheet: bool, with_view: bool) -> Document {
    let mut doc = Document::new("Populated");
    for i in 0..sheets {
        doc.add_entity(Sheet::new(format!("S{i:03}"), format!("Sheet {i}")))
            .unwrap();
    }
    for i in 0..views {
        let size = 100.0 * (i as f64 + 1.0);
        doc.add_entity(plan(&format!("View {i}"), Vector2::ZERO, Vector2::new(size, size)))
            .unwrap();
    }
    if with_sheet {
        doc.add_entity(Sheet::new("A101", SHEET_NAME)).unwrap();
    }
    if with_view {
        doc.add_entity(plan(VIEW_NAME, Vector2::new(-5.0, -5.0), Vector2::new(5.0, 15.0)))
            .unwrap();
    }
    doc
}
