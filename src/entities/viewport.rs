//! Viewport entity - a view placed on a sheet

use crate::entities::{Category, Entity, EntityCommon};
use crate::types::{BoundingBox2D, Handle, Outline, Vector2};
use bitflags::bitflags;

bitflags! {
    /// Viewport display status flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ViewportStatusFlags: u16 {
        /// Viewport is on (visible)
        const ON = 0x1;
        /// Position is locked on the sheet
        const LOCKED = 0x2;
        /// View title is shown under the viewport
        const TITLE_VISIBLE = 0x4;
        /// Viewport is excluded from printing
        const HIDE_PLOT = 0x8;
    }
}

impl ViewportStatusFlags {
    /// Status of a freshly placed viewport
    pub fn default_on() -> Self {
        ViewportStatusFlags::ON | ViewportStatusFlags::TITLE_VISIBLE
    }
}

/// Association of a view with a sheet
///
/// A viewport shows `view` on `sheet`, centered at `center` in sheet units.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Common entity properties
    pub common: EntityCommon,
    /// Hosting sheet
    pub sheet: Handle,
    /// Placed view
    pub view: Handle,
    /// Center point on the sheet
    pub center: Vector2,
    /// Width on the sheet
    pub width: f64,
    /// Height on the sheet
    pub height: f64,
    pub status: ViewportStatusFlags,
}

impl Viewport {
    /// Create a viewport of zero size
    pub fn new(sheet: Handle, view: Handle, center: Vector2) -> Self {
        Viewport {
            common: EntityCommon::default(),
            sheet,
            view,
            center,
            width: 0.0,
            height: 0.0,
            status: ViewportStatusFlags::default_on(),
        }
    }

    /// Set the on-sheet size from a view outline drawn at `1:scale`
    pub fn sized_from(mut self, outline: &Outline, scale: u32) -> Self {
        let bounds = outline.bounds();
        let factor = if scale == 0 { 1.0 } else { 1.0 / f64::from(scale) };
        self.width = bounds.width() * factor;
        self.height = bounds.height() * factor;
        self
    }

    /// Rectangle covered on the sheet
    pub fn box_on_sheet(&self) -> BoundingBox2D {
        let half = Vector2::new(self.width / 2.0, self.height / 2.0);
        BoundingBox2D::new(self.center - half, self.center + half)
    }

    pub fn is_on(&self) -> bool {
        self.status.contains(ViewportStatusFlags::ON)
    }
}

impl Entity for Viewport {
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
        Category::Viewports
    }

    fn outline(&self) -> Option<Outline> {
        Some(Outline::Rectangle(self.box_on_sheet()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let vp = Viewport::new(Handle::new(1), Handle::new(2), Vector2::new(5.0, 5.0));
        assert!(vp.is_on());
        assert!(vp.status.contains(ViewportStatusFlags::TITLE_VISIBLE));
        assert!(!vp.status.contains(ViewportStatusFlags::LOCKED));
        assert_eq!(vp.category(), Category::Viewports);
    }

    #[test]
    fn test_viewport_sized_from_outline() {
        let outline = Outline::rectangle(Vector2::ZERO, Vector2::new(2000.0, 1000.0));
        let vp = Viewport::new(Handle::new(1), Handle::new(2), Vector2::new(100.0, 100.0))
            .sized_from(&outline, 100);
        assert_eq!(vp.width, 20.0);
        assert_eq!(vp.height, 10.0);
        assert_eq!(
            vp.box_on_sheet(),
            BoundingBox2D::new(Vector2::new(90.0, 95.0), Vector2::new(110.0, 105.0))
        );
    }

    #[test]
    fn test_viewport_zero_scale_is_full_size() {
        let outline = Outline::rectangle(Vector2::ZERO, Vector2::new(4.0, 2.0));
        let vp = Viewport::new(Handle::new(1), Handle::new(2), Vector2::ZERO).sized_from(&outline, 0);
        assert_eq!((vp.width, vp.height), (4.0, 2.0));
    }
}
