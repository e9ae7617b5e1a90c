//! Diesel row models for board persistence.

use super::schema::boards;
use crate::board::domain::{Column, Member};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query result row for board records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Owning user identifier.
    pub owner: String,
    /// Nested board document.
    pub document: Value,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for board records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Owning user identifier.
    pub owner: String,
    /// Nested board document.
    pub document: Value,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// JSONB payload holding the nested collections of a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Columns with their cards, in display order.
    pub columns: Vec<Column>,
    /// Member set in join order.
    pub members: Vec<Member>,
}
