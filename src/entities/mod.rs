//! Document entity types and traits

use crate::types::{Handle, Outline};
use std::fmt;

pub mod sheet;
pub mod view;
pub mod viewport;

pub use sheet::Sheet;
pub use view::{View, ViewType};
pub use viewport::{Viewport, ViewportStatusFlags};

/// Category tag used to restrict entity queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Placement surfaces
    Sheets,
    /// Placeable content with an outline
    Views,
    /// A view placed on a sheet
    Viewports,
}

impl Category {
    /// Human-readable name of a single member of the category
    pub fn singular(&self) -> &'static str {
        match self {
            Category::Sheets => "Sheet",
            Category::Views => "View",
            Category::Viewports => "Viewport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Sheets => write!(f, "Sheets"),
            Category::Views => write!(f, "Views"),
            Category::Viewports => write!(f, "Viewports"),
        }
    }
}

/// Base trait for all document entities
pub trait Entity {
    /// Get the entity's unique handle
    fn handle(&self) -> Handle;

    /// Set the entity's handle
    fn set_handle(&mut self, handle: Handle);

    /// Display name (not unique within a document)
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// Category the entity is filed under
    fn category(&self) -> Category;

    /// Bounding outline, for geometry-bearing entities
    fn outline(&self) -> Option<Outline> {
        None
    }
}

/// Common entity data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityCommon {
    /// Unique handle
    pub handle: Handle,
    /// Display name
    pub name: String,
}

impl EntityCommon {
    pub fn new(name: impl Into<String>) -> Self {
        EntityCommon {
            handle: Handle::NULL,
            name: name.into(),
        }
    }
}

/// Entity stored in a [`Document`](crate::Document)
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Sheet(Sheet),
    View(View),
    Viewport(Viewport),
}

impl EntityType {
    /// Get as trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Sheet(e) => e,
            EntityType::View(e) => e,
            EntityType::Viewport(e) => e,
        }
    }

    /// Get as mutable trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Sheet(e) => e,
            EntityType::View(e) => e,
            EntityType::Viewport(e) => e,
        }
    }

    /// Shared entity data
    pub fn common(&self) -> &EntityCommon {
        match self {
            EntityType::Sheet(e) => &e.common,
            EntityType::View(e) => &e.common,
            EntityType::Viewport(e) => &e.common,
        }
    }

    pub fn handle(&self) -> Handle {
        self.common().handle
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn category(&self) -> Category {
        self.as_entity().category()
    }

    pub fn as_sheet(&self) -> Option<&Sheet> {
        match self {
            EntityType::Sheet(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn as_view(&self) -> Option<&View> {
        match self {
            EntityType::View(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_view_mut(&mut self) -> Option<&mut View> {
        match self {
            EntityType::View(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_viewport(&self) -> Option<&Viewport> {
        match self {
            EntityType::Viewport(viewport) => Some(viewport),
            _ => None,
        }
    }
}

impl From<Sheet> for EntityType {
    fn from(sheet: Sheet) -> Self {
        EntityType::Sheet(sheet)
    }
}

impl From<View> for EntityType {
    fn from(view: View) -> Self {
        EntityType::View(view)
    }
}

impl From<Viewport> for EntityType {
    fn from(viewport: Viewport) -> Self {
        EntityType::Viewport(viewport)
    }
}
