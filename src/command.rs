//! Place-view command
//!
//! Locates a sheet and a view by name, computes where the view goes and
//! places it on the sheet inside a single transaction. Every failure is
//! turned into [`CommandResult::Failed`] with a readable message, and the
//! document's entities are left exactly as they were.

use crate::document::Document;
use crate::entities::{Category, Entity};
use crate::error::SheetError;
use crate::locator::{EntityCollector, Located, NameMatch};
use crate::notification::{Notification, NotificationType};
use crate::placement::compute_anchor;
use crate::transaction::Transaction;
use crate::types::{Handle, Vector2};
use crate::Result;
use std::fmt;

/// Outcome reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Succeeded,
    Failed,
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Succeeded => write!(f, "Succeeded"),
            CommandResult::Failed => write!(f, "Failed"),
        }
    }
}

/// A command the host can invoke against its active document
pub trait Command {
    /// Name shown by the host
    fn name(&self) -> &str;

    /// Run the command
    ///
    /// On [`CommandResult::Failed`], `message` holds a non-empty description
    /// of the cause; on success it is left untouched.
    fn execute(&self, document: &mut Document, message: &mut String) -> CommandResult;
}

/// Which outline the placement anchor is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorSource {
    /// Midpoint of the view's own outline
    #[default]
    ViewOutline,
    /// Midpoint of the sheet's paper area (centers the view on the sheet)
    SheetOutline,
}

/// Configuration for [`PlaceViewCommand`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceViewConfiguration {
    /// Name of the hosting sheet.
    ///
    /// Default: `"My First Sheet"`.
    pub sheet_name: String,
    /// Name of the view to place.
    ///
    /// Default: `"Our first plan!"`.
    pub view_name: String,
    /// Label of the transaction recorded in the document history.
    ///
    /// Default: `"Place View"`.
    pub transaction_name: String,
    /// How sheet and view names are compared.
    ///
    /// Default: [`NameMatch::Exact`].
    pub name_match: NameMatch,
    /// Outline the anchor is computed from.
    ///
    /// Default: [`AnchorSource::ViewOutline`].
    pub anchor_source: AnchorSource,
}

impl Default for PlaceViewConfiguration {
    fn default() -> Self {
        Self {
            sheet_name: "My First Sheet".to_string(),
            view_name: "Our first plan!".to_string(),
            transaction_name: "Place View".to_string(),
            name_match: NameMatch::Exact,
            anchor_source: AnchorSource::ViewOutline,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub sheet: Handle,
    pub view: Handle,
    /// Newly created viewport
    pub viewport: Handle,
    /// Center of the viewport on the sheet
    pub anchor: Vector2,
}

/// Places a named view on a named sheet
#[derive(Debug, Clone, Default)]
pub struct PlaceViewCommand {
    config: PlaceViewConfiguration,
}

impl PlaceViewCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PlaceViewConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlaceViewConfiguration {
        &self.config
    }

    /// Run the command, returning the error instead of a result code
    pub fn run(&self, document: &mut Document) -> Result<Placement> {
        let config = &self.config;

        let (sheet, sheet_outline, sheet_matches) = {
            let located = self.locate(document, Category::Sheets, &config.sheet_name)?;
            let outline = located.entity.as_entity().outline();
            (located.handle(), outline, located.match_count)
        };
        let (view, view_outline, view_matches) = {
            let located = self.locate(document, Category::Views, &config.view_name)?;
            let outline = located.entity.as_entity().outline();
            (located.handle(), outline, located.match_count)
        };
        let warnings: Vec<Notification> = [
            ambiguity(sheet, &config.sheet_name, sheet_matches),
            ambiguity(view, &config.view_name, view_matches),
        ]
        .into_iter()
        .flatten()
        .collect();

        let outline = match config.anchor_source {
            AnchorSource::ViewOutline => view_outline,
            AnchorSource::SheetOutline => sheet_outline,
        };
        let anchor = outline
            .as_ref()
            .map(compute_anchor)
            .ok_or_else(|| SheetError::InvalidGeometry("entity has no outline".to_string()))?;

        let mut tx = Transaction::new(document, config.transaction_name.as_str());
        tx.start()?;

        let placed = tx
            .document_mut()
            .map_err(SheetError::from)
            .and_then(|doc| {
                let viewport = doc.place_view(sheet, view, anchor)?;
                for warning in warnings {
                    doc.notifications.push(warning);
                }
                Ok(viewport)
            });

        match placed {
            Ok(viewport) => {
                tx.commit()?;
                Ok(Placement {
                    sheet,
                    view,
                    viewport,
                    anchor,
                })
            }
            Err(err) => {
                tx.rollback_with_reason(&err.to_string())?;
                Err(err)
            }
        }
    }

    fn locate<'a>(&self, document: &'a Document, category: Category, name: &str) -> Result<Located<'a>> {
        EntityCollector::new(document)
            .of_category(category)
            .by_name(name, self.config.name_match)
    }
}

/// Warning for a name shared by several entities, recorded only when the
/// placement goes through
fn ambiguity(chosen: Handle, name: &str, matches: usize) -> Option<Notification> {
    (matches > 1).then(|| {
        Notification::new(
            NotificationType::Warning,
            format!("{matches} entities are named '{name}'; using the one with the lowest handle"),
        )
        .about(chosen)
    })
}

impl Command for PlaceViewCommand {
    fn name(&self) -> &str {
        "Place View"
    }

    fn execute(&self, document: &mut Document, message: &mut String) -> CommandResult {
        let _span = tracing::info_span!(
            "command",
            command = self.name(),
            sheet = %self.config.sheet_name,
            view = %self.config.view_name,
        )
        .entered();

        match self.run(document) {
            Ok(placement) => {
                tracing::info!(
                    viewport = %placement.viewport,
                    x = placement.anchor.x,
                    y = placement.anchor.y,
                    "view placed"
                );
                CommandResult::Succeeded
            }
            Err(err) => {
                tracing::warn!(error = %err, "command failed");
                *message = err.to_string();
                CommandResult::Failed
            }
        }
    }
}
