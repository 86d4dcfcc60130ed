//! Storage traits for the persistent store

use async_trait::async_trait;
use kip_types::{Discussion, Student};

use super::query::{AnswerPatch, DiscussionFilter, SortOrder, StudentFilter};
use crate::Result;

/// Student collection
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn count_students(&self) -> Result<u64>;
    async fn insert_students(&self, students: &[Student]) -> Result<()>;
    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>>;
}

/// Discussion collection
#[async_trait]
pub trait DiscussionStore: Send + Sync {
    async fn count_discussions(&self) -> Result<u64>;
    async fn insert_discussions(&self, discussions: &[Discussion]) -> Result<()>;
    async fn find_discussions(
        &self,
        filter: &DiscussionFilter,
        sort: SortOrder,
    ) -> Result<Vec<Discussion>>;
    async fn insert_discussion(&self, discussion: &Discussion) -> Result<()>;
    /// Patch the first record with this id; returns the number matched (0 or 1).
    async fn update_discussion(&self, id: i64, patch: &AnswerPatch) -> Result<u64>;
    /// Remove the first record with this id; returns the number removed (0 or 1).
    async fn delete_discussion(&self, id: i64) -> Result<u64>;
}

/// A persistent store serving both collections
pub trait PersistentStore: StudentStore + DiscussionStore {}

impl<T: StudentStore + DiscussionStore> PersistentStore for T {}
