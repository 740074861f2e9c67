//! Assignable item entity model and DTOs (PRD-11).
//!
//! An assignable item is a unit of required work: an onboarding document to
//! submit or a training module to work through. Items are created by
//! administrators, never mutated by completion events, and deleted only by
//! explicit admin action.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffhub_core::progress::{AssignableItem, ItemKind};
use staffhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `assignable_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignableItemRow {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub is_required: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AssignableItemRow {
    /// Convert to the domain type used by the progress aggregator.
    ///
    /// Fails only on an unknown kind string, which indicates data written
    /// outside the application.
    pub fn to_domain(&self) -> Result<AssignableItem, String> {
        Ok(AssignableItem {
            id: self.id,
            kind: ItemKind::from_str_value(&self.kind)?,
            is_required: self.is_required,
        })
    }
}

/// DTO for creating an assignable item.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItem {
    /// One of the known item kind strings; validated by the handler.
    pub kind: String,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub description: Option<String>,
    /// Only required items count toward completion-rate denominators.
    #[serde(default = "default_required")]
    pub is_required: bool,
    pub created_by: Option<DbId>,
}

fn default_required() -> bool {
    true
}

/// DTO for partially updating an assignable item.
///
/// The kind is fixed at creation; re-kinding an item would silently rewrite
/// historical rates.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_required: Option<bool>,
}
