//! bopodrill - mastery drill for single bopomofo phonetic symbols
//!
//! Core pieces: an explainable trace grader over rasterized coverage
//! ([`grading`]) and a mastery-gated checkpoint state machine
//! ([`checkpoint`]). Around them: the fixed symbol catalog, persisted
//! teacher/student/stats state, fire-and-forget result delivery, and a
//! spoken-prompt seam.

pub mod catalog;
pub mod checkpoint;
pub mod drill;
pub mod grading;
pub mod report;
pub mod speech;
pub mod store;
