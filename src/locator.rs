//! Entity lookup by category and predicate
//!
//! Entities are scanned in document order, restricted to one category. When
//! several entities satisfy the predicate the one with the lowest handle is
//! returned, so a lookup never depends on storage order and repeated lookups
//! against the same state yield the same entity.

use crate::document::Document;
use crate::entities::{Category, EntityType, Sheet, View};
use crate::error::SheetError;
use crate::types::Handle;
use crate::Result;

/// How entity names are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Equality after Unicode lowercasing
    IgnoreCase,
}

impl NameMatch {
    pub fn matches(&self, candidate: &str, wanted: &str) -> bool {
        match self {
            NameMatch::Exact => candidate == wanted,
            NameMatch::IgnoreCase => candidate.to_lowercase() == wanted.to_lowercase(),
        }
    }
}

/// A successful lookup
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    /// The chosen entity (lowest handle among the matches)
    pub entity: &'a EntityType,
    /// How many entities matched in total
    pub match_count: usize,
}

impl<'a> Located<'a> {
    pub fn handle(&self) -> Handle {
        self.entity.handle()
    }

    /// More than one entity matched
    pub fn is_ambiguous(&self) -> bool {
        self.match_count > 1
    }
}

/// Filtered view over a document's entities
#[derive(Debug, Clone, Copy)]
pub struct EntityCollector<'a> {
    document: &'a Document,
    category: Option<Category>,
}

impl<'a> EntityCollector<'a> {
    /// Collector over every entity of `document`
    pub fn new(document: &'a Document) -> Self {
        EntityCollector {
            document,
            category: None,
        }
    }

    /// Restrict to one category
    pub fn of_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Entities passing the category filter, in document order
    pub fn iter(&self) -> impl Iterator<Item = &'a EntityType> + 'a {
        let category = self.category;
        self.document
            .entities()
            .filter(move |e| category.map_or(true, |c| e.category() == c))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Every entity satisfying `predicate`, ordered by handle
    pub fn all<P>(&self, predicate: P) -> Vec<&'a EntityType>
    where
        P: Fn(&EntityType) -> bool,
    {
        let mut found: Vec<&'a EntityType> = self.iter().filter(|e| predicate(*e)).collect();
        found.sort_by_key(|e| e.handle());
        found
    }

    /// The matching entity with the lowest handle
    pub fn first<P>(&self, predicate: P) -> Option<Located<'a>>
    where
        P: Fn(&EntityType) -> bool,
    {
        let mut match_count = 0;
        let mut best: Option<&'a EntityType> = None;
        for entity in self.iter().filter(|e| predicate(*e)) {
            match_count += 1;
            if best.map_or(true, |b| entity.handle() < b.handle()) {
                best = Some(entity);
            }
        }
        best.map(|entity| Located {
            entity,
            match_count,
        })
    }

    /// Look up an entity by display name
    ///
    /// Requires a category filter to build a meaningful
    /// [`SheetError::NotFound`]; without one the miss is reported against
    /// [`Category::Views`].
    pub fn by_name(&self, name: &str, mode: NameMatch) -> Result<Located<'a>> {
        let category = self.category.unwrap_or(Category::Views);
        let located = self
            .first(|e| mode.matches(e.name(), name))
            .ok_or_else(|| SheetError::NotFound {
                category,
                name: name.to_string(),
            })?;

        if located.is_ambiguous() {
            tracing::warn!(
                %category,
                entity_name = name,
                matches = located.match_count,
                chosen = %located.handle(),
                "several entities share this name, using the lowest handle"
            );
        } else {
            tracing::debug!(%category, entity_name = name, handle = %located.handle(), "entity located");
        }
        Ok(located)
    }
}

/// Name reported by [`find`] when no entity satisfies the predicate
pub const PREDICATE_QUERY: &str = "<predicate>";

/// Find the entity of `category` satisfying `predicate`
///
/// A miss is [`SheetError::NotFound`] named [`PREDICATE_QUERY`].
pub fn find<'a, P>(document: &'a Document, category: Category, predicate: P) -> Result<&'a EntityType>
where
    P: Fn(&EntityType) -> bool,
{
    EntityCollector::new(document)
        .of_category(category)
        .first(predicate)
        .map(|located| located.entity)
        .ok_or_else(|| SheetError::NotFound {
            category,
            name: PREDICATE_QUERY.to_string(),
        })
}

/// Find a sheet by exact name
pub fn find_sheet<'a>(document: &'a Document, name: &str) -> Result<&'a Sheet> {
    let located = EntityCollector::new(document)
        .of_category(Category::Sheets)
        .by_name(name, NameMatch::Exact)?;
    located.entity.as_sheet().ok_or(SheetError::WrongCategory {
        handle: located.handle(),
        expected: "sheet",
    })
}

/// Find a view by exact name
pub fn find_view<'a>(document: &'a Document, name: &str) -> Result<&'a View> {
    let located = EntityCollector::new(document)
        .of_category(Category::Views)
        .by_name(name, NameMatch::Exact)?;
    located.entity.as_view().ok_or(SheetError::WrongCategory {
        handle: located.handle(),
        expected: "view",
    })
}
