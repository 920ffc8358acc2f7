//! Study goals and their traffic-light evaluation.

use crate::constants::{DAYS_PER_YEAR, DURATION_GOAL_BUFFER_ECTS, GRADE_GOAL_TOLERANCE};
use crate::student::Student;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Traffic-light outcome of a goal review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Achieved,
    InProgress,
    Missed,
}

impl GoalStatus {
    /// Human-readable label for views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Achieved => "Achieved",
            Self::InProgress => "In progress",
            Self::Missed => "Missed",
        }
    }
}

/// A personal study goal. The set is closed; new kinds extend this enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StudyGoal {
    /// Keep the grade average at or below a target value.
    Grade { id: i64, target_average: f64 },
    /// Graduate within a number of years.
    Duration { id: i64, target_years: u32 },
}

/// One evaluated goal, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalReview {
    pub description: String,
    pub status: GoalStatus,
    pub details: String,
}

impl StudyGoal {
    /// A human-readable description of the goal.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Grade { target_average, .. } => format!("Grade target (\u{2264} {target_average})"),
            Self::Duration { target_years, .. } => format!("Graduate in {target_years} years"),
        }
    }

    /// Evaluates the goal against the student's progress as of `on`.
    #[must_use]
    pub fn review(&self, student: &Student, on: NaiveDate) -> GoalReview {
        let (status, details) = match self {
            Self::Grade { target_average, .. } => review_grade_goal(student, *target_average),
            Self::Duration { target_years, .. } => review_duration_goal(student, *target_years, on),
        };

        GoalReview { description: self.description(), status, details }
    }
}

fn review_grade_goal(student: &Student, target: f64) -> (GoalStatus, String) {
    let Some(average) = student.grade_average() else {
        return (GoalStatus::InProgress, "No grades yet".to_owned());
    };

    let details = format!("Current {average:.2} | target \u{2264} {target}");

    // Lower grades are better on the German scale.
    let status = if average <= target {
        GoalStatus::Achieved
    } else if average <= target + GRADE_GOAL_TOLERANCE {
        GoalStatus::InProgress
    } else {
        GoalStatus::Missed
    };

    (status, details)
}

fn review_duration_goal(student: &Student, target_years: u32, on: NaiveDate) -> (GoalStatus, String) {
    if target_years == 0 {
        return (GoalStatus::InProgress, "Invalid goal duration".to_owned());
    }

    let expected_rate_per_year = f64::from(student.program.total_ects) / f64::from(target_years);

    #[allow(clippy::cast_precision_loss)]
    let years_elapsed = (on - student.enrolled_on).num_days() as f64 / DAYS_PER_YEAR;

    let expected_ects = expected_rate_per_year * years_elapsed;
    let earned_ects = f64::from(student.earned_ects());

    let details =
        format!("Earned {} ECTS | expected {} ECTS", student.earned_ects(), expected_ects as i64);

    let shortfall = expected_ects - earned_ects;
    let status = if shortfall <= 0.0 {
        GoalStatus::Achieved
    } else if shortfall <= DURATION_GOAL_BUFFER_ECTS {
        GoalStatus::InProgress
    } else {
        GoalStatus::Missed
    };

    (status, details)
}
