//! Typed filters, ordering and patches shared by every store
//!
//! Both the persistent store and the in-memory store evaluate the same
//! filter values, so `matches` is the single definition of what a filter
//! selects.

use chrono::{DateTime, Utc};
use kip_types::{Discussion, Student};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFilter {
    All,
    ById(String),
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            StudentFilter::All => true,
            StudentFilter::ById(id) => student.student_id == *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscussionFilter {
    All,
    ById(i64),
}

impl DiscussionFilter {
    pub fn matches(&self, discussion: &Discussion) -> bool {
        match self {
            DiscussionFilter::All => true,
            DiscussionFilter::ById(id) => discussion.id == *id,
        }
    }
}

/// Parse a discussion id from a path segment; anything else matches no record.
pub fn parse_discussion_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Whatever order the store keeps records in
    #[default]
    Natural,
    CreatedAtDesc,
}

impl SortOrder {
    pub fn apply(self, discussions: &mut [Discussion]) {
        if self == SortOrder::CreatedAtDesc {
            discussions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
    }
}

/// Fields written by the answer operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPatch {
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}

impl AnswerPatch {
    pub fn new(answer: impl Into<String>, answered_at: DateTime<Utc>) -> Self {
        Self {
            answer: answer.into(),
            answered_at,
        }
    }

    pub fn apply(&self, discussion: &mut Discussion) {
        discussion.answer = Some(self.answer.clone());
        discussion.answered_at = Some(self.answered_at);
    }
}
