//! Demo data for local development.
//!
//! Seeds one program and one student so the dashboard renders something
//! meaningful on a fresh database. The seed is idempotent and never touches
//! existing data.

use crate::Database;
use crate::error::DatabaseError;
use crate::students::{GoalRow, ModuleRow, ProgramRow, RecordRow, StudentRow};
use tracing::info;

const DEMO_PROGRAM_ID: i64 = 1;
const DEMO_STUDENT_ID: i64 = 1;

/// Inserts the demo program and student unless the student already exists.
///
/// Returns `true` when data was written.
///
/// # Errors
/// * [`DatabaseError::Surreal`] when a query fails.
pub async fn run(db: &Database) -> Result<bool, DatabaseError> {
    let mut response = db
        .query("RETURN record::exists(type::record('student', $id))")
        .bind(("id", DEMO_STUDENT_ID))
        .await?;

    if response.take::<Option<bool>>(0)?.unwrap_or_default() {
        return Ok(false);
    }

    db.query("UPSERT type::record('program', $id) CONTENT $data")
        .bind(("id", DEMO_PROGRAM_ID))
        .bind(("data", demo_program()))
        .await?
        .check()?;

    db.query("UPSERT type::record('student', $id) CONTENT $data")
        .bind(("id", DEMO_STUDENT_ID))
        .bind(("data", demo_student()))
        .await?
        .check()?;

    info!(student = DEMO_STUDENT_ID, program = DEMO_PROGRAM_ID, "Seeded demo data");
    Ok(true)
}

fn demo_program() -> ProgramRow {
    let module = |id: i64, title: &str, ects: i64, semester: i64, exam: &str| ModuleRow {
        id,
        title: title.to_owned(),
        ects,
        semester,
        exam: exam.to_owned(),
    };

    ProgramRow {
        title: "Computer Science".to_owned(),
        total_ects: 180,
        degree: "bsc".to_owned(),
        modules: vec![
            module(101, "Programming 1", 6, 1, "written"),
            module(102, "Mathematics 1", 8, 1, "written"),
            module(201, "Web Development", 6, 2, "term_paper"),
            module(202, "Programming 2", 6, 3, "written"),
            module(203, "Databases", 6, 3, "term_paper"),
            module(301, "Mathematics 3", 8, 3, "written"),
        ],
    }
}

fn demo_student() -> StudentRow {
    let passed = |id: i64, module_id: i64, grade: f64| RecordRow {
        id,
        module_id,
        grade: Some(grade),
        status: "passed".to_owned(),
    };

    StudentRow {
        name: "Max Mustermann".to_owned(),
        matriculation: 123_456,
        enrolled_on: "2024-10-01".to_owned(),
        program_id: DEMO_PROGRAM_ID,
        records: vec![
            passed(1, 202, 1.7),
            passed(2, 203, 2.0),
            RecordRow { id: 3, module_id: 301, grade: None, status: "enrolled".to_owned() },
            passed(4, 101, 2.3),
            passed(5, 102, 3.0),
            passed(6, 201, 1.3),
        ],
        goals: vec![
            GoalRow { id: 1, kind: "grade".to_owned(), target_average: Some(2.0), target_years: None },
            GoalRow {
                id: 2,
                kind: "duration".to_owned(),
                target_average: None,
                target_years: Some(3),
            },
        ],
    }
}
