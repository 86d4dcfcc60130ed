//! Fallback resolver
//!
//! Routes every read and write to the persistent store when one is
//! connected, and re-runs the same operation against the in-memory store
//! when there is no connection or the persistent call fails. The decision is
//! made per call: a failed query does not disable the persistent store for
//! later calls, and nothing written to memory is ever copied back.

use kip_core::{
    AnswerPatch, Discussion, DiscussionFilter, DiscussionStore, PersistentStore, Result,
    SortOrder, Student, StudentFilter, StudentStore,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use super::MemoryStore;

/// The persistent side of the resolver, fixed at startup
#[derive(Clone)]
pub enum Store {
    Connected(Arc<dyn PersistentStore>),
    Unavailable,
}

/// Which store served a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Persistent,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served<T> {
    pub value: T,
    pub backend: Backend,
}

impl<T> Served<T> {
    fn new(value: T, backend: Backend) -> Self {
        Self { value, backend }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Served<U> {
        Served::new(f(self.value), self.backend)
    }
}

pub struct FallbackResolver {
    primary: Store,
    memory: Arc<MemoryStore>,
}

impl FallbackResolver {
    pub fn new(primary: Store, memory: Arc<MemoryStore>) -> Self {
        Self { primary, memory }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.primary, Store::Connected(_))
    }

    /// Try `persistent` once; on any error, or without a connection, serve
    /// the call with `fallback` instead.
    async fn resolve<T, P, Fut, M>(
        &self,
        operation: &'static str,
        persistent: P,
        fallback: M,
    ) -> Served<T>
    where
        P: FnOnce(Arc<dyn PersistentStore>) -> Fut,
        Fut: Future<Output = Result<T>>,
        M: FnOnce(&MemoryStore) -> T,
    {
        match &self.primary {
            Store::Connected(store) => match persistent(Arc::clone(store)).await {
                Ok(value) => return Served::new(value, Backend::Persistent),
                Err(e) => {
                    warn!("Persistent store {} failed, falling back to memory: {}", operation, e);
                }
            },
            Store::Unavailable => {
                debug!("No persistent store, serving {} from memory", operation);
            }
        }

        Served::new(fallback(&self.memory), Backend::Memory)
    }

    pub async fn find_student(&self, student_id: &str) -> Served<Option<Student>> {
        let filter = &StudentFilter::ById(student_id.to_string());
        self.resolve(
            "find_student",
            |store| async move {
                store
                    .find_students(filter)
                    .await
                    .map(|found| found.into_iter().next())
            },
            |memory| memory.find_students(filter).into_iter().next(),
        )
        .await
    }

    pub async fn list_students(&self) -> Served<Vec<Student>> {
        let filter = &StudentFilter::All;
        self.resolve(
            "list_students",
            |store| async move { store.find_students(filter).await },
            |memory| memory.find_students(filter),
        )
        .await
    }

    pub async fn list_discussions(&self, sort: SortOrder) -> Served<Vec<Discussion>> {
        let filter = &DiscussionFilter::All;
        self.resolve(
            "list_discussions",
            |store| async move { store.find_discussions(filter, sort).await },
            |memory| memory.find_discussions(filter, sort),
        )
        .await
    }

    pub async fn insert_discussion(&self, discussion: &Discussion) -> Served<()> {
        self.resolve(
            "insert_discussion",
            |store| async move { store.insert_discussion(discussion).await },
            |memory| memory.insert_discussion_front(discussion.clone()),
        )
        .await
    }

    /// Returns whether a discussion with this id was found.
    pub async fn answer_discussion(&self, id: i64, patch: &AnswerPatch) -> Served<bool> {
        self.resolve(
            "answer_discussion",
            |store| async move { store.update_discussion(id, patch).await },
            |memory| memory.update_discussion(id, patch),
        )
        .await
        .map(|matched| matched > 0)
    }

    /// Returns whether a discussion was removed.
    pub async fn delete_discussion(&self, id: i64) -> Served<bool> {
        self.resolve(
            "delete_discussion",
            |store| async move { store.delete_discussion(id).await },
            |memory| memory.delete_discussion(id),
        )
        .await
        .map(|deleted| deleted > 0)
    }
}
