//! Student lookup service

use crate::storage::FallbackResolver;
use kip_core::{KipError, Result, StudentStatus, StudentSummary};
use std::sync::Arc;
use tracing::debug;

pub struct StudentLookup {
    resolver: Arc<FallbackResolver>,
}

impl StudentLookup {
    pub fn new(resolver: Arc<FallbackResolver>) -> Self {
        Self { resolver }
    }

    pub async fn lookup(&self, student_id: &str) -> Result<StudentStatus> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(KipError::Validation("Student ID is required".to_string()));
        }

        let served = self.resolver.find_student(student_id).await;
        debug!("Student {} looked up via {:?}", student_id, served.backend);

        Ok(match served.into_inner() {
            Some(student) => StudentStatus::found(&student),
            None => StudentStatus::not_found(),
        })
    }

    /// Registered students only, projected to their public fields.
    pub async fn list_registered(&self) -> Result<Vec<StudentSummary>> {
        let students = self.resolver.list_students().await.into_inner();

        Ok(students
            .iter()
            .filter(|s| s.is_registered())
            .map(|s| s.summary())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fallback::tests::{resolver_with, FlakyStore};
    use crate::storage::Store;
    use kip_core::Student;

    fn lookup_with(store: Store) -> StudentLookup {
        StudentLookup::new(Arc::new(resolver_with(store)))
    }

    #[tokio::test]
    async fn test_seeded_scenario() {
        let service = lookup_with(Store::Unavailable);

        let registered = service.lookup("2021001").await.unwrap();
        assert!(registered.exists && registered.registered);
        assert_eq!(registered.name.as_deref(), Some("Ahmad Rizki"));

        let unregistered = service.lookup("2021003").await.unwrap();
        assert!(unregistered.exists);
        assert!(!unregistered.registered);

        let missing = service.lookup("9999999").await.unwrap();
        assert!(!missing.exists);
        assert!(!missing.registered);
    }

    #[tokio::test]
    async fn test_lookup_trims_and_rejects_blank() {
        let service = lookup_with(Store::Unavailable);

        assert!(service.lookup("  2021002 ").await.unwrap().exists);
        for blank in ["", "   ", "\t"] {
            let err = service.lookup(blank).await.unwrap_err();
            assert!(matches!(err, KipError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_registered_absent_flag_counts_as_registered() {
        let flaky = FlakyStore::with_students(
            0,
            vec![Student {
                student_id: "2023001".to_string(),
                name: None,
                registered: None,
            }],
        );
        let service = lookup_with(Store::Connected(Arc::new(flaky)));

        let status = service.lookup("2023001").await.unwrap();
        assert!(status.exists && status.registered);
        assert_eq!(status.name.as_deref(), Some("N/A"));
    }

    #[tokio::test]
    async fn test_list_registered_hides_unregistered() {
        let service = lookup_with(Store::Connected(Arc::new(FlakyStore::failing_forever())));

        let students = service.list_registered().await.unwrap();
        assert_eq!(students.len(), 4);
        assert!(students.iter().all(|s| s.student_id != "2021003"));
        assert_eq!(students[0].student_id, "2021001");
    }
}
