//! Shared types: completion subjects, award outcomes, and the request and
//! response bodies exchanged with the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progression::Rank;

/// What kind of unit a completion refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Lesson,
    Quiz,
    Challenge,
    Course,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Lesson => "lesson",
            SubjectKind::Quiz => "quiz",
            SubjectKind::Challenge => "challenge",
            SubjectKind::Course => "course",
        }
    }
}

/// Composite key of a completable unit. Course-level subjects carry
/// lesson number 0 so the storage uniqueness constraint still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub kind: SubjectKind,
    pub course_id: String,
    pub lesson_number: u32,
}

impl Subject {
    pub fn lesson(course_id: &str, lesson_number: u32) -> Self {
        Self {
            kind: SubjectKind::Lesson,
            course_id: course_id.to_string(),
            lesson_number,
        }
    }

    pub fn quiz(course_id: &str, lesson_number: u32) -> Self {
        Self {
            kind: SubjectKind::Quiz,
            course_id: course_id.to_string(),
            lesson_number,
        }
    }

    pub fn challenge(course_id: &str, lesson_number: u32) -> Self {
        Self {
            kind: SubjectKind::Challenge,
            course_id: course_id.to_string(),
            lesson_number,
        }
    }

    pub fn course(course_id: &str) -> Self {
        Self {
            kind: SubjectKind::Course,
            course_id: course_id.to_string(),
            lesson_number: 0,
        }
    }
}

/// Result of one award attempt. A duplicate is not a failure: it comes back
/// as `xp_added == 0` with `already_completed` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardOutcome {
    pub xp_added: u64,
    pub new_level: u32,
    pub already_completed: bool,
}

/// An account row as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub display_name: String,
    pub xp: u64,
    pub numeric_level: u32,
    pub rank: Rank,
    pub created_at: DateTime<Utc>,
}

/// Dashboard view of an account: stored totals plus progress-bar fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProgress {
    pub email: String,
    pub display_name: String,
    pub xp: u64,
    pub level: u32,
    pub rank: Rank,
    pub xp_into_level: u64,
    pub xp_to_next: u64,
}

/// A catalog course joined with one account's progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub total_lessons: u32,
    pub xp_reward: u64,
    pub difficulty: String,
    pub category: String,
    pub progress_pct: u32,
    pub completed: bool,
}

/// Per-lesson badge data for one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseStatus {
    pub course_id: String,
    pub lessons: Vec<u32>,
    pub quizzes: Vec<u32>,
    pub challenges: Vec<u32>,
    pub progress_pct: u32,
    pub completed: bool,
}

/// One append-only award log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub action: String,
    pub xp_awarded: u64,
    pub awarded_at: DateTime<Utc>,
}

// ============================================================================
// HTTP request/response bodies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCourseRequest {
    pub email: String,
    pub course_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteLessonRequest {
    pub email: String,
    pub course_id: String,
    pub lesson_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteCourseRequest {
    pub email: String,
    pub course_id: String,
}

/// Response for every completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub xp_added: u64,
    pub new_level: u32,
    pub already_completed: bool,
    pub progress_pct: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub email: String,
    pub entries: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
