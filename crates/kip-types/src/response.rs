//! Response envelopes for the HTTP surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Discussion, Student, StudentSummary};

pub const MSG_STUDENT_REGISTERED: &str = "Student ID terdaftar dalam program KIP Kuliah";
pub const MSG_STUDENT_UNREGISTERED: &str =
    "Student ID ditemukan tetapi tidak terdaftar dalam program KIP Kuliah";
pub const MSG_STUDENT_NOT_FOUND: &str = "Student ID tidak ditemukan dalam database";

/// Result of a student lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatus {
    pub exists: bool,
    pub registered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub message: String,
}

impl StudentStatus {
    pub fn found(student: &Student) -> Self {
        let registered = student.is_registered();
        let message = if registered {
            MSG_STUDENT_REGISTERED
        } else {
            MSG_STUDENT_UNREGISTERED
        };

        Self {
            exists: true,
            registered,
            student_id: Some(student.student_id.clone()),
            name: Some(student.display_name().to_string()),
            message: message.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            exists: false,
            registered: false,
            student_id: None,
            name: None,
            message: MSG_STUDENT_NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub success: bool,
    pub count: usize,
    pub students: Vec<StudentSummary>,
}

impl StudentListResponse {
    pub fn new(students: Vec<StudentSummary>) -> Self {
        Self {
            success: true,
            count: students.len(),
            students,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionListResponse {
    pub success: bool,
    pub count: usize,
    pub discussions: Vec<Discussion>,
}

impl DiscussionListResponse {
    pub fn new(discussions: Vec<Discussion>) -> Self {
        Self {
            success: true,
            count: discussions.len(),
            discussions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionCreatedResponse {
    pub success: bool,
    pub message: String,
    pub discussion: Discussion,
}

/// Plain `{success, message}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Error body; `exists` is only set by the student endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// `persistent` or `memory`
    pub store: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_status_messages() {
        let registered = StudentStatus::found(&Student::new("2021001", "Ahmad Rizki", true));
        assert!(registered.exists && registered.registered);
        assert_eq!(registered.message, MSG_STUDENT_REGISTERED);

        let unregistered = StudentStatus::found(&Student::new("2021003", "Budi Santoso", false));
        assert!(unregistered.exists);
        assert!(!unregistered.registered);
        assert_eq!(unregistered.message, MSG_STUDENT_UNREGISTERED);

        let missing = StudentStatus::not_found();
        assert!(!missing.exists);
        let value = serde_json::to_value(&missing).unwrap();
        assert!(value.get("studentId").is_none());
    }

    #[test]
    fn test_list_counts() {
        let response = StudentListResponse::new(vec![Student::new("1", "A", true).summary()]);
        assert_eq!(response.count, 1);
        assert!(response.success);
    }
}
