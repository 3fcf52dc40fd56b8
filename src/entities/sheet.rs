//! Sheet entity - a placement surface that hosts views

use crate::entities::{Category, Entity, EntityCommon};
use crate::types::{BoundingBox2D, Handle, Outline, Vector2};

/// A sheet of paper onto which views are placed
///
/// The paper area is expressed in sheet units with the origin at the
/// lower-left corner of the title block.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Common entity properties
    pub common: EntityCommon,
    /// Sheet number, e.g. `A101`
    pub sheet_number: String,
    /// Printable paper area
    pub paper: BoundingBox2D,
    /// Placeholder sheets exist only in the sheet list and cannot host views
    pub is_placeholder: bool,
}

impl Sheet {
    /// Width/height of an ISO A1 sheet in millimetres
    pub const A1: (f64, f64) = (841.0, 594.0);

    /// Create a sheet with an A1 paper area
    pub fn new(sheet_number: impl Into<String>, name: impl Into<String>) -> Self {
        Sheet {
            common: EntityCommon::new(name),
            sheet_number: sheet_number.into(),
            paper: BoundingBox2D::new(Vector2::ZERO, Vector2::new(Self::A1.0, Self::A1.1)),
            is_placeholder: false,
        }
    }

    /// Create a placeholder sheet
    pub fn placeholder(sheet_number: impl Into<String>, name: impl Into<String>) -> Self {
        Sheet {
            is_placeholder: true,
            ..Self::new(sheet_number, name)
        }
    }

    /// Replace the paper area
    pub fn with_paper(mut self, paper: BoundingBox2D) -> Self {
        self.paper = paper;
        self
    }
}

impl Entity for Sheet {
    fn handle(&self) -> Handle {
        self.common.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.common.handle = handle;
    }

    fn name(&self) -> &str {
        &self.common.name
    }

    fn set_name(&mut self, name: String) {
        self.common.name = name;
    }

    fn category(&self) -> Category {
        Category::Sheets
    }

    fn outline(&self) -> Option<Outline> {
        Some(Outline::Rectangle(self.paper))
    }
}
