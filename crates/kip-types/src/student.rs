//! Student types

use serde::{Deserialize, Serialize};

use crate::UNNAMED;

/// Student record as held by either store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
}

impl Student {
    pub fn new(student_id: impl Into<String>, name: impl Into<String>, registered: bool) -> Self {
        Self {
            student_id: student_id.into(),
            name: Some(name.into()),
            registered: Some(registered),
        }
    }

    /// Registered unless explicitly marked `false`
    pub fn is_registered(&self) -> bool {
        self.registered != Some(false)
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED,
        }
    }

    /// Public projection used by the registered-students listing
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            student_id: self.student_id.clone(),
            name: self.display_name().to_string(),
        }
    }
}

/// Public fields of a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student_id: String,
    pub name: String,
}
