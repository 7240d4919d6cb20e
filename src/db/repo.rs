//! Repository layer for student records.
//!
//! Every operation checks one connection out of the pool and hands it back
//! when it returns, on success and error paths alike. Mutations run inside a
//! transaction that is rolled back on any failure.

use crate::domain::{Student, StudentDraft};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool, SqliteRow};
use sqlx::{Connection, Row};
use thiserror::Error;
use tracing::debug;

/// Failure kinds surfaced by the repository.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("student_id or email already exists")]
    Conflict(#[source] sqlx::Error),
    #[error("student {0} not found")]
    NotFound(i64),
    #[error("{0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(err),
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(err),
            _ => StoreError::Database(err),
        }
    }
}

/// Repository for the `students` table.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        self.pool.acquire().await.map_err(StoreError::Connection)
    }

    /// Round-trip a trivial query to prove the database is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    /// All students, newest first.
    pub async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let mut conn = self.acquire().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, student_id, name, email, phone, course, year, address, created_at
            FROM students
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        rows_to_students(&rows)
    }

    /// Insert a student and return its generated id.
    ///
    /// # Errors
    /// `Conflict` when `student_id` or `email` is already taken.
    pub async fn insert_student(&self, draft: &StudentDraft) -> Result<i64, StoreError> {
        let mut conn = self.acquire().await?;
        let mut tx = conn.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO students (student_id, name, email, phone, course, year, address)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(draft.student_id.as_deref())
        .bind(draft.name.as_deref())
        .bind(draft.email.as_deref())
        .bind(draft.phone.as_deref())
        .bind(draft.course.as_deref())
        .bind(draft.year)
        .bind(draft.address.as_deref())
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        debug!(id, "Inserted student");
        Ok(id)
    }

    /// Overwrite every mutable column of student `id`.
    ///
    /// # Errors
    /// `NotFound` when no row has this id, `Conflict` when the new
    /// `student_id` or `email` belongs to another row.
    pub async fn update_student(&self, id: i64, draft: &StudentDraft) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;
        let mut tx = conn.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE students
            SET student_id = ?, name = ?, email = ?, phone = ?,
                course = ?, year = ?, address = ?
            WHERE id = ?
            "#,
        )
        .bind(draft.student_id.as_deref())
        .bind(draft.name.as_deref())
        .bind(draft.email.as_deref())
        .bind(draft.phone.as_deref())
        .bind(draft.course.as_deref())
        .bind(draft.year)
        .bind(draft.address.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotFound(id));
        }

        tx.commit().await?;
        debug!(id, "Updated student");
        Ok(())
    }

    /// Physically remove student `id`.
    pub async fn delete_student(&self, id: i64) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;
        let mut tx = conn.begin().await?;

        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotFound(id));
        }

        tx.commit().await?;
        debug!(id, "Deleted student");
        Ok(())
    }

    /// Students whose `name` or `student_id` contains `query`, ignoring case.
    ///
    /// Case folding happens here rather than in SQL: SQLite `LIKE` folds
    /// ASCII letters only. An empty query matches nothing.
    pub async fn search_students(&self, query: &str) -> Result<Vec<Student>, StoreError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let students = self.list_students().await?;

        Ok(students
            .into_iter()
            .filter(|s| matches_query(s, &needle))
            .collect())
    }
}

fn rows_to_students(rows: &[SqliteRow]) -> Result<Vec<Student>, StoreError> {
    rows.iter()
        .map(student_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreError::from)
}

fn student_from_row(row: &SqliteRow) -> Result<Student, sqlx::Error> {
    Ok(Student {
        id: row.try_get("id")?,
        student_id: row.try_get("student_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        course: row.try_get("course")?,
        year: row.try_get("year")?,
        address: row.try_get("address")?,
        created_at: row.try_get("created_at")?,
    })
}

/// `needle` must already be lowercased.
fn matches_query(student: &Student, needle: &str) -> bool {
    student.name.to_lowercase().contains(needle)
        || student.student_id.to_lowercase().contains(needle)
}
