//! Fixed seed records
//!
//! Both the in-memory store and an empty persistent store start from these.

use chrono::{DateTime, TimeZone, Utc};
use kip_types::{Discussion, Student};

pub fn students() -> Vec<Student> {
    vec![
        Student::new("2021001", "Ahmad Rizki", true),
        Student::new("2021002", "Siti Nurhaliza", true),
        Student::new("2021003", "Budi Santoso", false),
        Student::new("2022001", "Dewi Sartika", true),
        Student::new("2022002", "Muhammad Fadli", true),
    ]
}

pub fn discussions() -> Vec<Discussion> {
    vec![
        Discussion {
            id: 1,
            name: "Ahmad".to_string(),
            email: "ahmad@student.uin.ac.id".to_string(),
            question: "Bagaimana cara mengajukan perpanjangan KIP Kuliah?".to_string(),
            created_at: midnight(2024, 1, 15),
            answer: Some(
                "Untuk perpanjangan KIP Kuliah, silakan hubungi bagian kemahasiswaan dengan membawa dokumen yang diperlukan."
                    .to_string(),
            ),
            answered_at: None,
        },
        Discussion {
            id: 2,
            name: "Siti".to_string(),
            email: "siti@student.uin.ac.id".to_string(),
            question: "Apakah ada batasan IPK untuk mempertahankan KIP Kuliah?".to_string(),
            created_at: midnight(2024, 1, 10),
            answer: Some(
                "Ya, mahasiswa harus mempertahankan IPK minimal 2.75 untuk dapat melanjutkan KIP Kuliah."
                    .to_string(),
            ),
            answered_at: None,
        },
    ]
}

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
