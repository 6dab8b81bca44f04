//! Student identity
//!
//! The id (seat number or code) is what the teacher keys results on; it
//! is required before a checkpoint may start. The name is optional.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const STUDENT_KEY: &str = "student_v3";

const MAX_ID_LEN: usize = 12;
const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub student_id: String,
    pub student_name: String,
}

impl StudentProfile {
    /// Strip whitespace from the id and enforce the length caps.
    pub fn normalized(self) -> Self {
        let id: String = self
            .student_id
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(MAX_ID_LEN)
            .collect();
        let name: String = self.student_name.chars().take(MAX_NAME_LEN).collect();
        StudentProfile { student_id: id, student_name: name }
    }

    /// Whether the profile satisfies the checkpoint start precondition.
    pub fn is_ready(&self) -> bool {
        !self.student_id.is_empty()
    }
}

pub fn load(dir: &Path) -> StudentProfile {
    super::load_json(dir, STUDENT_KEY, StudentProfile::default()).normalized()
}

pub fn save(dir: &Path, student: &StudentProfile) -> Result<()> {
    super::save_json(dir, STUDENT_KEY, student)
}
