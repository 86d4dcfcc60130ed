//! In-memory record store (fallback when SQLite is unavailable)

use kip_core::{seed, AnswerPatch, Discussion, DiscussionFilter, SortOrder, Student, StudentFilter};
use parking_lot::RwLock;

/// Ordered, process-lifetime sequences for both collections.
///
/// Every operation is synchronous and infallible; locks are never held
/// across an `.await`.
pub struct MemoryStore {
    students: RwLock<Vec<Student>>,
    discussions: RwLock<Vec<Discussion>>,
}

impl MemoryStore {
    /// Store initialized from the fixed seed records
    pub fn new() -> Self {
        Self::with_records(seed::students(), seed::discussions())
    }

    pub fn with_records(students: Vec<Student>, discussions: Vec<Discussion>) -> Self {
        Self {
            students: RwLock::new(students),
            discussions: RwLock::new(discussions),
        }
    }

    pub fn student_count(&self) -> usize {
        self.students.read().len()
    }

    pub fn discussion_count(&self) -> usize {
        self.discussions.read().len()
    }

    pub fn find_students(&self, filter: &StudentFilter) -> Vec<Student> {
        self.students
            .read()
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect()
    }

    pub fn find_discussions(&self, filter: &DiscussionFilter, sort: SortOrder) -> Vec<Discussion> {
        let mut found: Vec<Discussion> = self
            .discussions
            .read()
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        sort.apply(&mut found);
        found
    }

    /// Newest records go first so unsorted reads are still newest-first.
    pub fn insert_discussion_front(&self, discussion: Discussion) {
        self.discussions.write().insert(0, discussion);
    }

    /// Patch the first record with this id; returns 1 if one matched, 0 otherwise.
    pub fn update_discussion(&self, id: i64, patch: &AnswerPatch) -> u64 {
        let mut discussions = self.discussions.write();
        match discussions.iter_mut().find(|d| d.id == id) {
            Some(discussion) => {
                patch.apply(discussion);
                1
            }
            None => 0,
        }
    }

    /// Remove the first record with this id; returns 1 if one was removed, 0 otherwise.
    pub fn delete_discussion(&self, id: i64) -> u64 {
        let mut discussions = self.discussions.write();
        match discussions.iter().position(|d| d.id == id) {
            Some(index) => {
                discussions.remove(index);
                1
            }
            None => 0,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
