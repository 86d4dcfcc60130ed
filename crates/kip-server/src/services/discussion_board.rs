//! Discussion board service

use crate::storage::FallbackResolver;
use chrono::Utc;
use kip_core::{
    parse_discussion_id, AnswerPatch, Discussion, KipError, NewDiscussion, Result, SortOrder,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::IdGenerator;

pub struct DiscussionBoard {
    resolver: Arc<FallbackResolver>,
    ids: IdGenerator,
}

impl DiscussionBoard {
    pub fn new(resolver: Arc<FallbackResolver>) -> Self {
        Self {
            resolver,
            ids: IdGenerator::new(),
        }
    }

    /// All discussions, newest first whichever store served them.
    pub async fn list(&self) -> Result<Vec<Discussion>> {
        let served = self.resolver.list_discussions(SortOrder::CreatedAtDesc).await;
        debug!("Listed discussions via {:?}", served.backend);

        let mut discussions = served.into_inner();
        SortOrder::CreatedAtDesc.apply(&mut discussions);
        Ok(discussions)
    }

    pub async fn create(&self, request: NewDiscussion) -> Result<Discussion> {
        let question = non_blank(request.question.as_deref())
            .ok_or_else(|| KipError::Validation("Question is required".to_string()))?;

        let now = Utc::now();
        let discussion = Discussion::new(
            self.ids.next_at(now),
            request.name.as_deref(),
            request.email.as_deref(),
            question,
            now,
        );

        let served = self.resolver.insert_discussion(&discussion).await;
        info!("Discussion {} created via {:?}", discussion.id, served.backend);

        Ok(discussion)
    }

    /// Set (or replace) the answer of the discussion with this id.
    pub async fn answer(&self, id: &str, answer: Option<&str>) -> Result<()> {
        let answer = non_blank(answer)
            .ok_or_else(|| KipError::Validation("Answer is required".to_string()))?;

        let discussion_id = parse_discussion_id(id).ok_or_else(|| not_found(id))?;
        let patch = AnswerPatch::new(answer, Utc::now());
        let served = self.resolver.answer_discussion(discussion_id, &patch).await;

        if !served.value {
            return Err(not_found(id));
        }
        info!("Discussion {} answered via {:?}", id, served.backend);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let discussion_id = parse_discussion_id(id).ok_or_else(|| not_found(id))?;
        let served = self.resolver.delete_discussion(discussion_id).await;

        if !served.value {
            return Err(not_found(id));
        }
        info!("Discussion {} deleted via {:?}", id, served.backend);
        Ok(())
    }
}

fn not_found(id: &str) -> KipError {
    KipError::NotFound(format!("discussion {}", id))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
