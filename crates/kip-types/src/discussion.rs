//! Discussion board types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ANONYMOUS;

/// A visitor question, optionally answered by an administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub question: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<DateTime<Utc>>,
}

impl Discussion {
    /// Build an unanswered discussion, applying the name/email defaults.
    pub fn new(
        id: i64,
        name: Option<&str>,
        email: Option<&str>,
        question: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(ANONYMOUS);
        let email = email.map(str::trim).unwrap_or_default();

        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            question: question.trim().to_string(),
            created_at,
            answer: None,
            answered_at: None,
        }
    }
}

/// Body of `POST /api/discussion`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDiscussion {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

/// Body of `PUT /api/discussion/:id/answer`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub answer: Option<String>,
}
