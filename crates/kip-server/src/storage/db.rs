//! SQLite persistent store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kip_core::{
    seed, AnswerPatch, Discussion, DiscussionFilter, DiscussionStore, KipError, Result,
    SortOrder, Student, StudentFilter, StudentStore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

const DISCUSSION_COLUMNS: &str = "id, name, email, question, created_at, answer, answered_at";

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool and run migrations. Any failure here means the process
    /// runs without a persistent store.
    pub async fn connect(url: &str, timeout: Duration, create_if_missing: bool) -> Result<Self> {
        info!("Connecting to SQLite at: {}", url);

        let options = SqliteConnectOptions::from_str(url)
            .map_err(connection_error)?
            .create_if_missing(create_if_missing)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        // Create parent directory if needed
        if create_if_missing {
            let filename = options.clone().get_filename();
            if let Some(parent) = filename.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        KipError::StoreConnection(format!(
                            "Failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await
            .map_err(connection_error)?;

        Self::run_migrations(&pool)
            .await
            .map_err(connection_error)?;

        info!("SQLite connection established");
        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                student_id TEXT NOT NULL,
                name TEXT,
                registered BOOLEAN
            )
            "#,
        )
        .execute(pool)
        .await?;

        // `id` is not unique: update/delete act on the first matching row
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS discussions (
                id INTEGER NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL DEFAULT '',
                question TEXT NOT NULL,
                created_at DATETIME NOT NULL,
                answer TEXT,
                answered_at DATETIME
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_student_id ON students (student_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_discussions_id ON discussions (id)")
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Seed each empty collection with the fixed records.
    pub async fn bootstrap(&self) -> Result<()> {
        if self.count_students().await? == 0 {
            self.insert_students(&seed::students()).await?;
            info!("Initialized students collection with seed data");
        }

        if self.count_discussions().await? == 0 {
            self.insert_discussions(&seed::discussions()).await?;
            info!("Initialized discussions collection with seed data");
        }

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl StudentStore for Database {
    async fn count_students(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await
            .map_err(operation_error)?;
        Ok(count as u64)
    }

    async fn insert_students(&self, students: &[Student]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(operation_error)?;
        for student in students {
            sqlx::query("INSERT INTO students (student_id, name, registered) VALUES (?1, ?2, ?3)")
                .bind(&student.student_id)
                .bind(&student.name)
                .bind(student.registered)
                .execute(&mut *tx)
                .await
                .map_err(operation_error)?;
        }
        tx.commit().await.map_err(operation_error)
    }

    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        let rows: Vec<StudentRow> = match filter {
            StudentFilter::All => {
                sqlx::query_as::<_, StudentRow>(
                    "SELECT student_id, name, registered FROM students ORDER BY rowid",
                )
                .fetch_all(&self.pool)
                .await
            }
            StudentFilter::ById(id) => {
                sqlx::query_as::<_, StudentRow>(
                    "SELECT student_id, name, registered FROM students WHERE student_id = ?1 ORDER BY rowid",
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(operation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl DiscussionStore for Database {
    async fn count_discussions(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM discussions")
            .fetch_one(&self.pool)
            .await
            .map_err(operation_error)?;
        Ok(count as u64)
    }

    async fn insert_discussions(&self, discussions: &[Discussion]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(operation_error)?;
        for discussion in discussions {
            insert_discussion_query(discussion)
                .execute(&mut *tx)
                .await
                .map_err(operation_error)?;
        }
        tx.commit().await.map_err(operation_error)
    }

    async fn find_discussions(
        &self,
        filter: &DiscussionFilter,
        sort: SortOrder,
    ) -> Result<Vec<Discussion>> {
        let order = match sort {
            SortOrder::Natural => "rowid",
            SortOrder::CreatedAtDesc => "created_at DESC",
        };

        let rows: Vec<DiscussionRow> = match filter {
            DiscussionFilter::All => {
                let sql = format!("SELECT {} FROM discussions ORDER BY {}", DISCUSSION_COLUMNS, order);
                sqlx::query_as::<_, DiscussionRow>(&sql).fetch_all(&self.pool).await
            }
            DiscussionFilter::ById(id) => {
                let sql = format!(
                    "SELECT {} FROM discussions WHERE id = ?1 ORDER BY {}",
                    DISCUSSION_COLUMNS, order
                );
                sqlx::query_as::<_, DiscussionRow>(&sql).bind(id).fetch_all(&self.pool).await
            }
        }
        .map_err(operation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_discussion(&self, discussion: &Discussion) -> Result<()> {
        insert_discussion_query(discussion)
            .execute(&self.pool)
            .await
            .map_err(operation_error)?;
        Ok(())
    }

    async fn update_discussion(&self, id: i64, patch: &AnswerPatch) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE discussions SET answer = ?1, answered_at = ?2
            WHERE rowid = (SELECT rowid FROM discussions WHERE id = ?3 ORDER BY rowid LIMIT 1)
            "#,
        )
        .bind(&patch.answer)
        .bind(patch.answered_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(operation_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_discussion(&self, id: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM discussions
            WHERE rowid = (SELECT rowid FROM discussions WHERE id = ?1 ORDER BY rowid LIMIT 1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(operation_error)?;

        Ok(result.rows_affected())
    }
}

fn insert_discussion_query(
    discussion: &Discussion,
) -> sqlx::query::Query<'_, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'_>> {
    sqlx::query(
        r#"
        INSERT INTO discussions (id, name, email, question, created_at, answer, answered_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(discussion.id)
    .bind(&discussion.name)
    .bind(&discussion.email)
    .bind(&discussion.question)
    .bind(discussion.created_at)
    .bind(&discussion.answer)
    .bind(discussion.answered_at)
}

fn connection_error(e: sqlx::Error) -> KipError {
    KipError::StoreConnection(e.to_string())
}

fn operation_error(e: sqlx::Error) -> KipError {
    KipError::StoreOperation(e.to_string())
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct StudentRow {
    student_id: String,
    name: Option<String>,
    registered: Option<bool>,
}

impl From<StudentRow> for Student {
    fn from(r: StudentRow) -> Self {
        Student {
            student_id: r.student_id,
            name: r.name,
            registered: r.registered,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DiscussionRow {
    id: i64,
    name: String,
    email: String,
    question: String,
    created_at: DateTime<Utc>,
    answer: Option<String>,
    answered_at: Option<DateTime<Utc>>,
}

impl From<DiscussionRow> for Discussion {
    fn from(r: DiscussionRow) -> Self {
        Discussion {
            id: r.id,
            name: r.name,
            email: r.email,
            question: r.question,
            created_at: r.created_at,
            answer: r.answer,
            answered_at: r.answered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use tokio_test::assert_ok;

    async fn open(dir: &tempfile::TempDir) -> Database {
        let url = format!("sqlite://{}", dir.path().join("kip.db").display());
        Database::connect(&url, Duration::from_secs(5), true)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_connect_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("kip.db");
        let url = format!("sqlite://{}", path.display());

        assert_ok!(Database::connect(&url, Duration::from_secs(5), true).await);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;

        assert_ok!(db.bootstrap().await);
        assert_ok!(db.bootstrap().await);

        assert_eq!(db.count_students().await.unwrap(), 5);
        assert_eq!(db.count_discussions().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("missing.db").display());

        let result = Database::connect(&url, Duration::from_secs(1), false).await;
        assert!(matches!(result, Err(KipError::StoreConnection(_))));
    }

    #[tokio::test]
    async fn test_find_students() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;
        db.bootstrap().await.unwrap();

        let found = db
            .find_students(&StudentFilter::ById("2021003".into()))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(!found[0].is_registered());

        let all = db.find_students(&StudentFilter::All).await.unwrap();
        assert_eq!(all, seed::students());
    }

    #[tokio::test]
    async fn test_discussion_round() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;
        db.bootstrap().await.unwrap();

        let now = Utc::now();
        let newest = Discussion::new(100, None, None, "How do I renew?", now);
        let oldest = Discussion::new(101, Some("Dewi"), None, "Old question", now - ChronoDuration::days(3650));
        db.insert_discussion(&newest).await.unwrap();
        db.insert_discussion(&oldest).await.unwrap();

        let sorted = db
            .find_discussions(&DiscussionFilter::All, SortOrder::CreatedAtDesc)
            .await
            .unwrap();
        let ids: Vec<i64> = sorted.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![100, 1, 2, 101]);
        assert_eq!(sorted[0].name, "Anonymous");
        assert!(sorted[0].answer.is_none());

        let patch = AnswerPatch::new("Hubungi kemahasiswaan", now);
        assert_eq!(db.update_discussion(100, &patch).await.unwrap(), 1);
        assert_eq!(db.update_discussion(999, &patch).await.unwrap(), 0);

        let answered = db
            .find_discussions(&DiscussionFilter::ById(100), SortOrder::Natural)
            .await
            .unwrap();
        assert_eq!(answered[0].answer.as_deref(), Some("Hubungi kemahasiswaan"));
        assert!(answered[0].answered_at.is_some());

        assert_eq!(db.delete_discussion(100).await.unwrap(), 1);
        assert_eq!(db.delete_discussion(100).await.unwrap(), 0);
        assert_eq!(db.count_discussions().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_ids_touch_first_match_only() {
        let dir = tempfile::tempdir().unwrap();
        let db = open(&dir).await;

        let now = Utc::now();
        let first = Discussion::new(5, None, None, "first", now);
        let second = Discussion::new(5, None, None, "second", now);
        db.insert_discussions(&[first, second]).await.unwrap();

        assert_eq!(db.delete_discussion(5).await.unwrap(), 1);
        let left = db
            .find_discussions(&DiscussionFilter::ById(5), SortOrder::Natural)
            .await
            .unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].question, "second");
    }
}
