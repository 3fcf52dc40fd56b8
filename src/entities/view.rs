//! View entity - placeable content with an outline

use crate::entities::{Category, Entity, EntityCommon};
use crate::types::{Handle, Outline};

/// Kind of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewType {
    #[default]
    FloorPlan,
    CeilingPlan,
    Elevation,
    Section,
    Detail,
    Drafting,
    Legend,
    ThreeD,
}

impl ViewType {
    /// Legends may appear on any number of sheets; every other view type
    /// lives on at most one sheet.
    pub fn allows_multiple_placement(&self) -> bool {
        matches!(self, ViewType::Legend)
    }
}

/// A view of the model that can be placed on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Common entity properties
    pub common: EntityCommon,
    pub view_type: ViewType,
    /// Crop outline in the view's own coordinates
    pub outline: Outline,
    /// Scale denominator (100 means 1:100)
    pub scale: u32,
    /// Templates carry settings only and are never placed
    pub is_template: bool,
    /// Sheet this view is placed on, [`Handle::NULL`] when unplaced
    pub sheet: Handle,
}

impl View {
    pub fn new(name: impl Into<String>, view_type: ViewType, outline: Outline) -> Self {
        View {
            common: EntityCommon::new(name),
            view_type,
            outline,
            scale: 100,
            is_template: false,
            sheet: Handle::NULL,
        }
    }

    /// Create a view template
    pub fn template(name: impl Into<String>, view_type: ViewType, outline: Outline) -> Self {
        View {
            is_template: true,
            ..Self::new(name, view_type, outline)
        }
    }

    /// Sheet the view is placed on, if any
    pub fn sheet(&self) -> Option<Handle> {
        self.sheet.is_valid().then_some(self.sheet)
    }

    pub fn is_placed(&self) -> bool {
        self.sheet.is_valid()
    }
}

impl Entity for View {
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
        Category::Views
    }

    fn outline(&self) -> Option<Outline> {
        Some(self.outline.clone())
    }
}
