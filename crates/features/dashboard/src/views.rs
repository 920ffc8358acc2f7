//! View models served to dashboard clients.

use chrono::NaiveDate;
use sdash_domain::{RecordStatus, Student};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const VIEW_DATE_FORMAT: &str = "%d.%m.%Y";

/// Everything the dashboard needs to render one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DashboardView {
    pub name: String,
    pub matriculation: u32,
    /// Program title with the degree spelled out, e.g. "Computer Science (Bachelor of Science)".
    pub program: String,
    /// Enrollment date, day-first.
    pub enrolled_on: String,
    pub current_semester: u32,
    pub goals: Vec<GoalView>,
    /// Course records of the current curriculum semester.
    pub semester_overview: Vec<RecordView>,
    pub progress: ProgressView,
}

/// One evaluated study goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GoalView {
    pub description: String,
    /// Traffic-light status label.
    pub status: String,
    pub details: String,
}

/// One course record as shown in the semester overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecordView {
    pub module: String,
    pub exam: String,
    pub grade: Option<f64>,
    /// "Passed" once the module is done, "Pending" otherwise.
    pub status: String,
}

/// ECTS progress toward the degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProgressView {
    pub earned_ects: u32,
    pub total_ects: u32,
    pub percent: u32,
}

/// Assembles the view model for a student as of `on`.
#[must_use]
pub fn assemble(student: &Student, on: NaiveDate) -> DashboardView {
    let current_semester = student.current_semester(on);
    let earned_ects = student.earned_ects();
    let total_ects = student.program.total_ects;

    let percent = if total_ects > 0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (f64::from(earned_ects) / f64::from(total_ects) * 100.0).round() as u32
        }
    } else {
        0
    };

    let goals = student
        .review_goals(on)
        .into_iter()
        .map(|review| GoalView {
            description: review.description,
            status: review.status.label().to_owned(),
            details: review.details,
        })
        .collect();

    let semester_overview = student
        .records
        .iter()
        .filter(|record| record.module.semester == current_semester)
        .map(|record| RecordView {
            module: record.module.title.clone(),
            exam: record.module.exam.label().to_owned(),
            grade: record.grade,
            status: if record.status == RecordStatus::Passed { "Passed" } else { "Pending" }
                .to_owned(),
        })
        .collect();

    DashboardView {
        name: student.name.clone(),
        matriculation: student.matriculation,
        program: format!("{} ({})", student.program.title, student.program.degree.label()),
        enrolled_on: student.enrolled_on.format(VIEW_DATE_FORMAT).to_string(),
        current_semester,
        goals,
        semester_overview,
        progress: ProgressView { earned_ects, total_ects, percent },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdash_domain::{
        CourseModule, CourseRecord, Degree, ExamFormat, Program, RecordStatus, Student, StudyGoal,
    };

    fn sample_student() -> Student {
        let modules = vec![
            CourseModule {
                id: 1,
                title: "Mathematics 1".to_owned(),
                ects: 8,
                semester: 1,
                exam: ExamFormat::Written,
            },
            CourseModule {
                id: 2,
                title: "Software Engineering".to_owned(),
                ects: 6,
                semester: 2,
                exam: ExamFormat::TermPaper,
            },
        ];

        Student {
            id: 1,
            name: "Max Mustermann".to_owned(),
            matriculation: 123_456,
            enrolled_on: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            program: Program {
                id: 1,
                title: "Computer Science".to_owned(),
                total_ects: 180,
                degree: Degree::Bsc,
                modules: modules.clone(),
            },
            records: vec![
                CourseRecord {
                    id: 1,
                    module: modules[0].clone(),
                    grade: Some(1.7),
                    status: RecordStatus::Passed,
                },
                CourseRecord {
                    id: 2,
                    module: modules[1].clone(),
                    grade: None,
                    status: RecordStatus::Enrolled,
                },
            ],
            goals: vec![StudyGoal::Grade { id: 1, target_average: 2.0 }],
        }
    }

    #[test]
    fn assembles_header_and_progress() {
        let student = sample_student();
        let view = assemble(&student, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

        assert_eq!(view.name, "Max Mustermann");
        assert_eq!(view.program, "Computer Science (Bachelor of Science)");
        assert_eq!(view.enrolled_on, "01.10.2024");
        assert_eq!(view.current_semester, 1);
        assert_eq!(view.progress, ProgressView { earned_ects: 8, total_ects: 180, percent: 4 });
    }

    #[test]
    fn overview_lists_only_the_current_semester() {
        let student = sample_student();

        let view = assemble(&student, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(view.semester_overview.len(), 1);
        assert_eq!(view.semester_overview[0].module, "Mathematics 1");
        assert_eq!(view.semester_overview[0].status, "Passed");

        // Half a year later the second-semester module shows up instead.
        let view = assemble(&student, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(view.semester_overview.len(), 1);
        assert_eq!(view.semester_overview[0].module, "Software Engineering");
        assert_eq!(view.semester_overview[0].exam, "Term paper");
        assert_eq!(view.semester_overview[0].status, "Pending");
    }

    #[test]
    fn goal_reviews_carry_labels() {
        let student = sample_student();
        let view = assemble(&student, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

        assert_eq!(view.goals.len(), 1);
        assert_eq!(view.goals[0].status, "Achieved");
        assert_eq!(view.goals[0].details, "Current 1.70 | target \u{2264} 2");
    }

    #[test]
    fn percent_is_zero_for_an_empty_program() {
        let mut student = sample_student();
        student.program.total_ects = 0;

        let view = assemble(&student, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(view.progress.percent, 0);
    }

    #[test]
    fn view_serializes_to_camel_case() {
        let student = sample_student();
        let view = assemble(&student, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("enrolledOn").is_some());
        assert!(json.get("currentSemester").is_some());
        assert!(json["progress"].get("earnedEcts").is_some());
    }
}
