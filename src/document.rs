//! Design document structure

use crate::entities::{Category, EntityType, Sheet, View, Viewport};
use crate::error::{PlacementRefusal, SheetError, TransactionError};
use crate::notification::NotificationCollection;
use crate::transaction::TransactionRecord;
use crate::types::{Handle, Vector2};
use crate::Result;
use indexmap::IndexMap;

/// Everything a transaction rollback restores
///
/// Two snapshots compare equal exactly when the documents hold the same
/// entities, in the same order, with the same handle counter.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    entities: IndexMap<Handle, EntityType>,
    next_handle: Handle,
}

impl DocumentSnapshot {
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

/// Who currently holds the right to mutate the document
#[derive(Debug, Clone, PartialEq, Eq)]
enum Lease {
    /// An editor outside this process (e.g. a sync in progress)
    External(String),
    /// A started [`Transaction`](crate::Transaction)
    Transaction(String),
}

/// Root container of sheets, views and viewports
#[derive(Debug, Clone)]
pub struct Document {
    /// Document title
    pub title: String,

    /// Diagnostics collected while querying and editing
    pub notifications: NotificationCollection,

    state: DocumentSnapshot,

    read_only: bool,

    lease: Option<Lease>,

    history: Vec<TransactionRecord>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Document {
            title: title.into(),
            notifications: NotificationCollection::new(),
            state: DocumentSnapshot {
                entities: IndexMap::new(),
                // Handles below 0x10 are reserved
                next_handle: Handle::new(0x10),
            },
            read_only: false,
            lease: None,
            history: Vec::new(),
        }
    }

    /// Allocate a fresh handle
    ///
    /// Fails once the handle space is used up.
    pub fn allocate_handle(&mut self) -> Result<Handle> {
        let handle = self.state.next_handle;
        self.state.next_handle = handle.successor().ok_or_else(handle_space_exhausted)?;
        Ok(handle)
    }

    /// Get the next handle value (without allocating)
    pub fn next_handle(&self) -> Handle {
        self.state.next_handle
    }

    /// Add an entity to the document
    ///
    /// A null handle is replaced by a freshly allocated one. An explicit
    /// handle must not collide with a live entity.
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) -> Result<Handle> {
        self.ensure_editable()?;
        let mut entity = entity.into();

        let handle = if entity.handle().is_null() {
            let h = self.allocate_handle()?;
            entity.as_entity_mut().set_handle(h);
            h
        } else {
            let h = entity.handle();
            if self.state.entities.contains_key(&h) {
                return Err(SheetError::Unexpected(format!(
                    "handle {h} is already in use"
                )));
            }
            if h >= self.state.next_handle {
                self.state.next_handle = h.successor().ok_or_else(handle_space_exhausted)?;
            }
            h
        };

        self.state.entities.insert(handle, entity);
        Ok(handle)
    }

    /// Get an entity by handle
    pub fn get_entity(&self, handle: Handle) -> Option<&EntityType> {
        self.state.entities.get(&handle)
    }

    /// Get a mutable entity by handle
    pub fn get_entity_mut(&mut self, handle: Handle) -> Result<&mut EntityType> {
        self.ensure_editable()?;
        self.state
            .entities
            .get_mut(&handle)
            .ok_or(SheetError::ObjectNotFound(handle))
    }

    /// Remove an entity by handle
    ///
    /// Removing a sheet or view also removes the viewports that reference
    /// it; removing a viewport unplaces its view.
    pub fn remove_entity(&mut self, handle: Handle) -> Result<EntityType> {
        self.ensure_editable()?;
        let removed = self
            .state
            .entities
            .shift_remove(&handle)
            .ok_or(SheetError::ObjectNotFound(handle))?;

        match &removed {
            EntityType::Viewport(viewport) => self.unplace(viewport.view),
            EntityType::Sheet(_) | EntityType::View(_) => {
                let dependents: Vec<Handle> = self
                    .viewports()
                    .filter(|vp| vp.sheet == handle || vp.view == handle)
                    .map(|vp| vp.common.handle)
                    .collect();
                for vp in dependents {
                    if let Some(EntityType::Viewport(viewport)) = self.state.entities.shift_remove(&vp) {
                        self.unplace(viewport.view);
                    }
                }
            }
        }
        Ok(removed)
    }

    fn unplace(&mut self, view: Handle) {
        if let Some(view) = self.state.entities.get_mut(&view).and_then(EntityType::as_view_mut) {
            view.sheet = Handle::NULL;
        }
    }

    /// Get the number of entities
    pub fn entity_count(&self) -> usize {
        self.state.entities.len()
    }

    /// Iterate over all entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.state.entities.values()
    }

    /// Iterate over the entities filed under `category`
    pub fn entities_of_category(&self, category: Category) -> impl Iterator<Item = &EntityType> {
        self.entities().filter(move |e| e.category() == category)
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.entities().filter_map(EntityType::as_sheet)
    }

    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.entities().filter_map(EntityType::as_view)
    }

    pub fn viewports(&self) -> impl Iterator<Item = &Viewport> {
        self.entities().filter_map(EntityType::as_viewport)
    }

    /// Viewports hosted by `sheet`
    pub fn viewports_on(&self, sheet: Handle) -> impl Iterator<Item = &Viewport> {
        self.viewports().filter(move |vp| vp.sheet == sheet)
    }

    /// Viewports showing `view`
    pub fn viewports_of(&self, view: Handle) -> impl Iterator<Item = &Viewport> {
        self.viewports().filter(move |vp| vp.view == view)
    }

    fn sheet(&self, handle: Handle) -> Result<&Sheet> {
        self.get_entity(handle)
            .ok_or(SheetError::ObjectNotFound(handle))?
            .as_sheet()
            .ok_or(SheetError::WrongCategory {
                handle,
                expected: "sheet",
            })
    }

    fn view(&self, handle: Handle) -> Result<&View> {
        self.get_entity(handle)
            .ok_or(SheetError::ObjectNotFound(handle))?
            .as_view()
            .ok_or(SheetError::WrongCategory {
                handle,
                expected: "view",
            })
    }

    /// Check whether `view` may be placed on `sheet`
    pub fn can_add_view_to_sheet(&self, sheet: Handle, view: Handle) -> Result<()> {
        let sheet = self.sheet(sheet)?;
        let view = self.view(view)?;

        let refusal = if sheet.is_placeholder {
            Some(PlacementRefusal::PlaceholderSheet)
        } else if view.is_template {
            Some(PlacementRefusal::Template)
        } else if !view.view_type.allows_multiple_placement()
            && (view.is_placed() || self.viewports_of(view.common.handle).next().is_some())
        {
            Some(PlacementRefusal::AlreadyPlaced)
        } else {
            None
        };

        match refusal {
            Some(reason) => Err(SheetError::Placement {
                view: view.common.name.clone(),
                sheet: sheet.common.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Place `view` on `sheet` centered at `center`, returning the new
    /// viewport's handle
    pub fn place_view(&mut self, sheet: Handle, view: Handle, center: Vector2) -> Result<Handle> {
        self.ensure_editable()?;
        if !center.is_finite() {
            return Err(SheetError::InvalidGeometry(format!(
                "viewport center {center} is not finite"
            )));
        }
        self.can_add_view_to_sheet(sheet, view)?;

        let placed = self.view(view)?;
        let single_sheet = !placed.view_type.allows_multiple_placement();
        let mut viewport = Viewport::new(sheet, view, center).sized_from(&placed.outline, placed.scale);
        viewport.common.name = placed.common.name.clone();

        let handle = self.add_entity(viewport)?;
        if single_sheet {
            if let Some(v) = self.state.entities.get_mut(&view).and_then(EntityType::as_view_mut) {
                v.sheet = sheet;
            }
        }

        tracing::debug!(%sheet, %view, %handle, x = center.x, y = center.y, "placed view on sheet");
        Ok(handle)
    }

    /// Check cross-entity consistency
    ///
    /// Every viewport must reference a live sheet and a live view, and views
    /// other than legends may appear in at most one viewport whose sheet
    /// matches the view's own sheet reference.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut seen: IndexMap<Handle, Handle> = IndexMap::new();
        for vp in self.viewports() {
            let handle = vp.common.handle;
            self.sheet(vp.sheet)
                .map_err(|e| format!("viewport {handle}: {e}"))?;
            let view = self.view(vp.view).map_err(|e| format!("viewport {handle}: {e}"))?;

            if view.view_type.allows_multiple_placement() {
                continue;
            }
            if let Some(previous) = seen.insert(vp.view, handle) {
                return Err(format!(
                    "view '{}' appears in viewports {previous} and {handle}",
                    view.common.name
                ));
            }
            if view.sheet != vp.sheet {
                return Err(format!(
                    "view '{}' is recorded on sheet {} but viewport {handle} is on {}",
                    view.common.name, view.sheet, vp.sheet
                ));
            }
        }
        Ok(())
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Mark the document as being edited by someone else
    ///
    /// While locked, transactions cannot start and direct edits fail.
    pub fn lock_for_editing(&mut self, holder: impl Into<String>) -> Result<()> {
        if let Some(current) = self.lease_holder() {
            return Err(TransactionError::NotModifiable(format!("already held by '{current}'")).into());
        }
        self.lease = Some(Lease::External(holder.into()));
        Ok(())
    }

    /// Release a lock taken with [`lock_for_editing`](Self::lock_for_editing)
    pub fn unlock(&mut self) {
        if matches!(self.lease, Some(Lease::External(_))) {
            self.lease = None;
        }
    }

    /// Name of whoever holds the mutation lease
    pub fn lease_holder(&self) -> Option<&str> {
        match &self.lease {
            Some(Lease::External(h)) | Some(Lease::Transaction(h)) => Some(h),
            None => None,
        }
    }

    /// True while a transaction is active on the document
    pub fn is_modifiable(&self) -> bool {
        matches!(self.lease, Some(Lease::Transaction(_)))
    }

    /// Transactions that reached a terminal state, oldest first
    pub fn transaction_history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Copy of the entity state
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.state.clone()
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.read_only {
            return Err(TransactionError::NotModifiable("document is read-only".into()).into());
        }
        if let Some(Lease::External(holder)) = &self.lease {
            return Err(TransactionError::NotModifiable(format!(
                "document is being modified by '{holder}'"
            ))
            .into());
        }
        Ok(())
    }

    /// Take the mutation lease for a starting transaction
    pub(crate) fn acquire_lease(&mut self, name: &str) -> std::result::Result<(), TransactionError> {
        if self.read_only {
            return Err(TransactionError::ReadOnly(name.to_string()));
        }
        if let Some(holder) = self.lease_holder() {
            return Err(TransactionError::DocumentLocked {
                name: name.to_string(),
                holder: holder.to_string(),
            });
        }
        self.lease = Some(Lease::Transaction(name.to_string()));
        Ok(())
    }

    pub(crate) fn release_lease(&mut self) {
        if matches!(self.lease, Some(Lease::Transaction(_))) {
            self.lease = None;
        }
    }

    pub(crate) fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.state = snapshot;
    }

    pub(crate) fn record_transaction(&mut self, record: TransactionRecord) {
        self.history.push(record);
    }
}

fn handle_space_exhausted() -> SheetError {
    SheetError::Unexpected("handle space exhausted".to_string())
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ViewType;
    use crate::types::Outline;

    fn plan(name: &str) -> View {
        View::new(
            name,
            ViewType::FloorPlan,
            Outline::rectangle(Vector2::ZERO, Vector2::new(1000.0, 500.0)),
        )
    }

    #[test]
    fn test_handles_are_monotonic() {
        let mut doc = Document::default();
        let a = doc.add_entity(Sheet::new("A101", "One")).unwrap();
        let b = doc.add_entity(Sheet::new("A102", "Two")).unwrap();
        assert!(a < b);
        assert_eq!(doc.next_handle(), Handle::new(b.value() + 1));
    }

    #[test]
    fn test_last_handle_is_refused() {
        let mut doc = Document::default();
        let mut sheet = Sheet::new("A101", "One");
        sheet.common.handle = Handle::new(u64::MAX);

        let err = doc.add_entity(sheet).unwrap_err();
        assert_eq!(err, SheetError::Unexpected("handle space exhausted".into()));
        assert_eq!(doc.entity_count(), 0);
        assert_eq!(doc.next_handle(), Handle::new(0x10));
    }

    #[test]
    fn test_allocation_stops_at_end_of_space() {
        let mut doc = Document::default();
        let mut sheet = Sheet::new("A101", "One");
        sheet.common.handle = Handle::new(u64::MAX - 1);
        doc.add_entity(sheet).unwrap();
        assert_eq!(doc.next_handle(), Handle::new(u64::MAX));

        assert!(doc.add_entity(Sheet::new("A102", "Two")).is_err());
        assert_eq!(doc.entity_count(), 1);
    }

    #[test]
    fn test_explicit_handle_collision() {
        let mut doc = Document::default();
        let mut sheet = Sheet::new("A101", "One");
        sheet.common.handle = Handle::new(0x40);
        doc.add_entity(sheet.clone()).unwrap();
        assert_eq!(doc.next_handle(), Handle::new(0x41));
        assert!(doc.add_entity(sheet).is_err());
    }

    #[test]
    fn test_entities_keep_insertion_order() {
        let mut doc = Document::default();
        doc.add_entity(plan("B")).unwrap();
        doc.add_entity(Sheet::new("A101", "Sheet")).unwrap();
        doc.add_entity(plan("A")).unwrap();
        let names: Vec<&str> = doc.entities_of_category(Category::Views).map(|e| e.name()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(doc.sheets().count(), 1);
    }

    #[test]
    fn test_place_view_links_entities() {
        let mut doc = Document::default();
        let sheet = doc.add_entity(Sheet::new("A101", "Sheet")).unwrap();
        let view = doc.add_entity(plan("Plan")).unwrap();

        let vp = doc.place_view(sheet, view, Vector2::new(400.0, 300.0)).unwrap();

        let viewport = doc.get_entity(vp).and_then(EntityType::as_viewport).unwrap();
        assert_eq!(viewport.center, Vector2::new(400.0, 300.0));
        assert_eq!(viewport.common.name, "Plan");
        assert_eq!((viewport.width, viewport.height), (10.0, 5.0));
        assert_eq!(doc.view(view).unwrap().sheet(), Some(sheet));
        assert_eq!(doc.viewports_on(sheet).count(), 1);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_view_cannot_be_placed_twice() {
        let mut doc = Document::default();
        let s1 = doc.add_entity(Sheet::new("A101", "One")).unwrap();
        let s2 = doc.add_entity(Sheet::new("A102", "Two")).unwrap();
        let view = doc.add_entity(plan("Plan")).unwrap();
        doc.place_view(s1, view, Vector2::ZERO).unwrap();

        let err = doc.place_view(s2, view, Vector2::ZERO).unwrap_err();
        assert!(matches!(
            err,
            SheetError::Placement {
                reason: PlacementRefusal::AlreadyPlaced,
                ..
            }
        ));
    }

    #[test]
    fn test_legend_on_many_sheets() {
        let mut doc = Document::default();
        let s1 = doc.add_entity(Sheet::new("A101", "One")).unwrap();
        let s2 = doc.add_entity(Sheet::new("A102", "Two")).unwrap();
        let legend = doc
            .add_entity(View::new(
                "Legend",
                ViewType::Legend,
                Outline::rectangle(Vector2::ZERO, Vector2::new(10.0, 10.0)),
            ))
            .unwrap();
        doc.place_view(s1, legend, Vector2::ZERO).unwrap();
        doc.place_view(s2, legend, Vector2::ZERO).unwrap();
        assert_eq!(doc.viewports_of(legend).count(), 2);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_refusals() {
        let mut doc = Document::default();
        let placeholder = doc.add_entity(Sheet::placeholder("X1", "Placeholder")).unwrap();
        let sheet = doc.add_entity(Sheet::new("A101", "Sheet")).unwrap();
        let template = doc
            .add_entity(View::template(
                "Template",
                ViewType::FloorPlan,
                Outline::rectangle(Vector2::ZERO, Vector2::new(1.0, 1.0)),
            ))
            .unwrap();
        let view = doc.add_entity(plan("Plan")).unwrap();

        assert!(matches!(
            doc.can_add_view_to_sheet(placeholder, view),
            Err(SheetError::Placement { reason: PlacementRefusal::PlaceholderSheet, .. })
        ));
        assert!(matches!(
            doc.can_add_view_to_sheet(sheet, template),
            Err(SheetError::Placement { reason: PlacementRefusal::Template, .. })
        ));
        assert!(matches!(
            doc.can_add_view_to_sheet(view, sheet),
            Err(SheetError::WrongCategory { .. })
        ));
        assert!(doc.can_add_view_to_sheet(sheet, view).is_ok());
    }

    #[test]
    fn test_non_finite_center_rejected() {
        let mut doc = Document::default();
        let sheet = doc.add_entity(Sheet::new("A101", "Sheet")).unwrap();
        let view = doc.add_entity(plan("Plan")).unwrap();
        let err = doc.place_view(sheet, view, Vector2::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, SheetError::InvalidGeometry(_)));
        assert_eq!(doc.viewports().count(), 0);
    }

    #[test]
    fn test_remove_sheet_cascades_to_viewports() {
        let mut doc = Document::default();
        let sheet = doc.add_entity(Sheet::new("A101", "Sheet")).unwrap();
        let view = doc.add_entity(plan("Plan")).unwrap();
        doc.place_view(sheet, view, Vector2::ZERO).unwrap();

        doc.remove_entity(sheet).unwrap();
        assert_eq!(doc.viewports().count(), 0);
        assert!(!doc.view(view).unwrap().is_placed());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_external_lock_blocks_edits() {
        let mut doc = Document::default();
        doc.lock_for_editing("Synchronize with central").unwrap();
        assert_eq!(doc.lease_holder(), Some("Synchronize with central"));
        assert!(doc.add_entity(Sheet::new("A101", "Sheet")).is_err());
        assert!(doc.lock_for_editing("other").is_err());

        doc.unlock();
        assert!(doc.lease_holder().is_none());
        assert!(doc.add_entity(Sheet::new("A101", "Sheet")).is_ok());
    }

    #[test]
    fn test_read_only_blocks_edits() {
        let mut doc = Document::default();
        doc.set_read_only(true);
        assert!(matches!(
            doc.add_entity(Sheet::new("A101", "Sheet")),
            Err(SheetError::Transaction(TransactionError::NotModifiable(_)))
        ));
    }

    #[test]
    fn test_validate_detects_dangling_viewport() {
        let mut doc = Document::default();
        let view = doc.add_entity(plan("Plan")).unwrap();
        doc.add_entity(Viewport::new(Handle::new(0x999), view, Vector2::ZERO))
            .unwrap();
        assert!(doc.validate().is_err());
    }
}
