//! The student aggregate and its study-progress rules.

use crate::constants::{MAX_GRADE, MIN_GRADE, MONTHS_PER_SEMESTER, PASS_THRESHOLD};
use crate::error::DomainError;
use crate::goals::{GoalReview, StudyGoal};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How a course module is examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExamFormat {
    Written,
    TermPaper,
}

impl ExamFormat {
    /// Human-readable label for views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Written => "Written exam",
            Self::TermPaper => "Term paper",
        }
    }
}

/// Degree awarded by a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Degree {
    Bsc,
    Msc,
}

impl Degree {
    /// Human-readable label for views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bsc => "Bachelor of Science",
            Self::Msc => "Master of Science",
        }
    }
}

/// Lifecycle of a course record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Passed,
    Failed,
    Enrolled,
}

/// A single course module (e.g. "Mathematics 1") with its curriculum metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: i64,
    pub title: String,
    pub ects: u32,
    /// Recommended semester in the curriculum.
    pub semester: u32,
    pub exam: ExamFormat,
}

/// A degree program and the modules it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub title: String,
    pub total_ects: u32,
    pub degree: Degree,
    pub modules: Vec<CourseModule>,
}

/// Links a student to a module together with the attempt outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: i64,
    pub module: CourseModule,
    pub grade: Option<f64>,
    pub status: RecordStatus,
}

/// The aggregate root: a student, their program, course records, and goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub matriculation: u32,
    pub enrolled_on: NaiveDate,
    pub program: Program,
    pub records: Vec<CourseRecord>,
    pub goals: Vec<StudyGoal>,
}

impl Student {
    /// ECTS credits earned so far (passed records only).
    #[must_use]
    pub fn earned_ects(&self) -> u32 {
        self.records
            .iter()
            .filter(|r| r.status == RecordStatus::Passed)
            .map(|r| r.module.ects)
            .sum()
    }

    /// Mean over all grades of completed attempts (passed or failed).
    ///
    /// Returns `None` while no graded attempt exists.
    #[must_use]
    pub fn grade_average(&self) -> Option<f64> {
        let grades: Vec<f64> = self
            .records
            .iter()
            .filter(|r| matches!(r.status, RecordStatus::Passed | RecordStatus::Failed))
            .filter_map(|r| r.grade)
            .collect();

        if grades.is_empty() {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        Some(grades.iter().sum::<f64>() / grades.len() as f64)
    }

    /// The semester the student is currently in, counted from the enrollment month.
    #[must_use]
    pub fn current_semester(&self, on: NaiveDate) -> u32 {
        let years = on.year() - self.enrolled_on.year();
        let months = i64::from(years) * 12
            + i64::from(on.month() as i32 - self.enrolled_on.month() as i32);

        // The first month of study already counts as semester 1.
        let semester = months.max(0) / i64::from(MONTHS_PER_SEMESTER) + 1;
        u32::try_from(semester).unwrap_or(u32::MAX)
    }

    /// Records a grade for an enrolled course record and derives its new status.
    ///
    /// # Errors
    /// * [`DomainError::RecordNotFound`] when no record carries `record_id`.
    /// * [`DomainError::GradeAlreadyRecorded`] when the record left `Enrolled`.
    /// * [`DomainError::GradeOutOfRange`] for grades outside `1.0..=5.0`.
    pub fn record_grade(&mut self, record_id: i64, grade: f64) -> Result<(), DomainError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(DomainError::RecordNotFound(record_id))?;

        if record.status != RecordStatus::Enrolled {
            return Err(DomainError::GradeAlreadyRecorded(record_id));
        }

        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(DomainError::GradeOutOfRange(grade));
        }

        record.grade = Some(grade);
        record.status =
            if grade <= PASS_THRESHOLD { RecordStatus::Passed } else { RecordStatus::Failed };

        Ok(())
    }

    /// Evaluates every study goal against the current progress.
    #[must_use]
    pub fn review_goals(&self, on: NaiveDate) -> Vec<GoalReview> {
        self.goals.iter().map(|goal| goal.review(self, on)).collect()
    }
}
