//! # Grade Repository
//!
//! Reads and writes the `grades` reference table.
//!
//! ## Name → Id Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI sends labels        normalize (core)        grades table           │
//! │  [" bnib", "Vnds "] ──► ["BNIB", "VNDS"] ──► SELECT id ... IN (?, ?)   │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                               [1, 2]  (may be empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching is exact on the stored name. Labels with no row are ignored.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use catalog_core::{Grade, GradeId};

use crate::error::DbResult;

/// Repository for grade reference data.
#[derive(Debug, Clone)]
pub struct GradeRepository {
    pool: SqlitePool,
}

impl GradeRepository {
    /// Creates a new GradeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GradeRepository { pool }
    }

    /// Ids of the grades whose name is in `names`, ascending.
    ///
    /// An empty `names` slice short-circuits without touching the database.
    pub async fn resolve_ids(&self, names: &[String]) -> DbResult<Vec<GradeId>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM grades WHERE name IN (");
        let mut separated = qb.separated(", ");
        for name in names {
            separated.push_bind(name.clone());
        }
        separated.push_unseparated(") ORDER BY id");

        let ids: Vec<GradeId> = qb.build_query_scalar().fetch_all(&self.pool).await?;

        debug!(requested = names.len(), resolved = ids.len(), "Resolved grade ids");
        Ok(ids)
    }

    /// All grades, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Grade>> {
        let grades = sqlx::query_as::<_, Grade>("SELECT id, name FROM grades ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(grades)
    }

    /// Inserts a grade and returns its id.
    ///
    /// Fails with `UniqueViolation` when the name already exists.
    pub async fn insert(&self, name: &str) -> DbResult<GradeId> {
        let result = sqlx::query("INSERT INTO grades (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }
}
