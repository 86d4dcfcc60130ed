//! Business logic services

pub mod discussion_board;
pub mod id_generator;
pub mod student_lookup;

pub use discussion_board::DiscussionBoard;
pub use id_generator::IdGenerator;
pub use student_lookup::StudentLookup;
