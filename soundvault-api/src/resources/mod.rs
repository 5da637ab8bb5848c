//! Catalog resources
//!
//! Each entity is described once by a [`ResourceSpec`] (table, aggregates,
//! filters, editable columns, delete mode) plus a record type read from the
//! store and an input type accepted from clients. The generic controller in
//! [`crate::api::resource`] and the store helpers in [`crate::store`] are
//! instantiated per entity through the [`Resource`] trait.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

use crate::error::ApiError;
use crate::query::{FilterSpec, SqlArg};

pub mod artists;
pub mod labels;
pub mod publishers;
pub mod recordings;
pub mod releases;
pub mod validation;

pub use artists::{Artist, ArtistInput, Artists};
pub use labels::{Label, LabelInput, Labels};
pub use publishers::{Publisher, PublisherInput, Publishers};
pub use recordings::{Recording, RecordingInput, Recordings};
pub use releases::{Release, ReleaseInput, Releases};

/// How DELETE removes a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Flip the active marker with the given `SET` assignment
    Soft(&'static str),
    /// Remove the row
    Hard,
}

/// Static description of one catalog table
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    /// Display name used in messages ("Artist not found")
    pub entity: &'static str,
    /// Table name, also the URL segment under `/api`
    pub table: &'static str,
    /// Alias used by `select`, `count_from` and filter columns
    pub alias: &'static str,
    /// Listing / get-by-id statement up to (not including) WHERE
    pub select: &'static str,
    /// FROM target for the count statement
    pub count_from: &'static str,
    /// Unaliased active-row predicate for soft-deleting tables
    pub active: Option<&'static str>,
    pub order_by: &'static str,
    pub filters: &'static [FilterSpec],
    /// Editable columns, in the order `Resource::column_values` returns them
    pub columns: &'static [&'static str],
    pub delete: DeleteMode,
}

impl ResourceSpec {
    /// Seed predicate for listings
    pub fn seed(&self) -> String {
        match self.active {
            Some(predicate) => format!("{}.{}", self.alias, predicate),
            None => "1=1".to_string(),
        }
    }

    /// Single-row statement; binds `id`
    pub fn select_by_id(&self, active_only: bool) -> String {
        let mut sql = format!("{} WHERE {}.id = ?", self.select, self.alias);
        if let (true, Some(_)) = (active_only, self.active) {
            sql.push_str(&format!(" AND {}", self.seed()));
        }
        sql
    }

    /// Binds `id` followed by every editable column
    pub fn insert_sql(&self) -> String {
        let placeholders = vec!["?"; self.columns.len() + 1].join(", ");
        format!(
            "INSERT INTO {} (id, {}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders
        )
    }

    /// Binds every editable column followed by `id`
    pub fn update_sql(&self) -> String {
        let assignments: Vec<String> = self.columns.iter().map(|c| format!("{} = ?", c)).collect();
        let mut sql = format!(
            "UPDATE {} SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            self.table,
            assignments.join(", ")
        );
        if let Some(active) = self.active {
            sql.push_str(&format!(" AND {}", active));
        }
        sql
    }

    /// Binds `id`
    pub fn delete_sql(&self) -> String {
        match (self.delete, self.active) {
            (DeleteMode::Soft(set), Some(active)) => format!(
                "UPDATE {} SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND {}",
                self.table, set, active
            ),
            (DeleteMode::Soft(set), None) => format!(
                "UPDATE {} SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
                self.table, set
            ),
            (DeleteMode::Hard, _) => format!("DELETE FROM {} WHERE id = ?", self.table),
        }
    }

    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully", self.entity)
    }
}

/// One catalog entity served by the generic controller
pub trait Resource: Send + Sync + 'static {
    /// Row as returned to clients, aggregates included
    type Record: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static;
    /// Full editable field set accepted on create and update
    type Input: DeserializeOwned + Send + Sync + 'static;

    const SPEC: ResourceSpec;

    /// Reject inputs that must never reach the store
    fn validate(input: &Self::Input) -> Result<(), ApiError>;

    /// Values for `SPEC.columns`, in the same order
    fn column_values(input: &Self::Input) -> Result<Vec<SqlArg>, serde_json::Error>;
}
