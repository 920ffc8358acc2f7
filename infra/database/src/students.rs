//! `SurrealDB`-backed student repository.
//!
//! Students and programs live in separate tables. Course records and goals are
//! embedded in the student row; records reference their module by id and are
//! joined against the program curriculum when a row is mapped onto the domain.

use crate::Database;
use crate::error::DatabaseError;
use chrono::NaiveDate;
use sdash_domain::repository::{RepositoryError, StudentRepository};
use sdash_domain::{
    CourseModule, CourseRecord, Degree, ExamFormat, Program, RecordStatus, Student, StudyGoal,
};
use std::str::FromStr;
use surrealdb::types::SurrealValue;

const DATE_FORMAT: &str = "%Y-%m-%d";

const GRADE_GOAL_KIND: &str = "grade";
const DURATION_GOAL_KIND: &str = "duration";

const SELECT_STUDENT: &str = "SELECT name, matriculation, enrolled_on, program_id, records, goals \
     FROM ONLY type::record('student', $id)";

const SELECT_PROGRAM: &str =
    "SELECT title, total_ects, degree, modules FROM ONLY type::record('program', $id)";

const UPSERT_STUDENT: &str = "UPSERT type::record('student', $id) CONTENT $data";

#[derive(Debug, SurrealValue)]
pub(crate) struct ModuleRow {
    pub id: i64,
    pub title: String,
    pub ects: i64,
    pub semester: i64,
    pub exam: String,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct ProgramRow {
    pub title: String,
    pub total_ects: i64,
    pub degree: String,
    pub modules: Vec<ModuleRow>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct RecordRow {
    pub id: i64,
    pub module_id: i64,
    pub grade: Option<f64>,
    pub status: String,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct GoalRow {
    pub id: i64,
    pub kind: String,
    pub target_average: Option<f64>,
    pub target_years: Option<i64>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct StudentRow {
    pub name: String,
    pub matriculation: i64,
    pub enrolled_on: String,
    pub program_id: i64,
    pub records: Vec<RecordRow>,
    pub goals: Vec<GoalRow>,
}

/// Student persistence on top of [`Database`].
#[derive(Debug, Clone)]
pub struct SurrealStudentRepository {
    db: Database,
}

impl SurrealStudentRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    async fn load(&self, student_id: i64) -> Result<Option<Student>, DatabaseError> {
        let row = self
            .db
            .query(SELECT_STUDENT)
            .bind(("id", student_id))
            .await?
            .take::<Option<StudentRow>>(0)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let program_row = self
            .db
            .query(SELECT_PROGRAM)
            .bind(("id", row.program_id))
            .await?
            .take::<Option<ProgramRow>>(0)?
            .ok_or_else(|| {
                DatabaseError::Mapping(format!(
                    "student {student_id} references unknown program {}",
                    row.program_id
                ))
            })?;

        let program = map_program(row.program_id, program_row)?;
        map_student(student_id, row, program).map(Some)
    }

    async fn store(&self, student: &Student) -> Result<(), DatabaseError> {
        self.db
            .query(UPSERT_STUDENT)
            .bind(("id", student.id))
            .bind(("data", student_to_row(student)))
            .await?
            .check()?;

        Ok(())
    }
}

impl StudentRepository for SurrealStudentRepository {
    async fn find_by_id(&self, student_id: i64) -> Result<Option<Student>, RepositoryError> {
        Ok(self.load(student_id).await?)
    }

    async fn save(&self, student: &Student) -> Result<(), RepositoryError> {
        Ok(self.store(student).await?)
    }
}

fn map_program(program_id: i64, row: ProgramRow) -> Result<Program, DatabaseError> {
    let degree = Degree::from_str(&row.degree)
        .map_err(|_| DatabaseError::Mapping(format!("unknown degree '{}'", row.degree)))?;

    let modules =
        row.modules.into_iter().map(map_module).collect::<Result<Vec<_>, DatabaseError>>()?;

    Ok(Program {
        id: program_id,
        title: row.title,
        total_ects: into_u32(row.total_ects, "total_ects")?,
        degree,
        modules,
    })
}

fn map_module(row: ModuleRow) -> Result<CourseModule, DatabaseError> {
    let exam = ExamFormat::from_str(&row.exam)
        .map_err(|_| DatabaseError::Mapping(format!("unknown exam format '{}'", row.exam)))?;

    Ok(CourseModule {
        id: row.id,
        title: row.title,
        ects: into_u32(row.ects, "ects")?,
        semester: into_u32(row.semester, "semester")?,
        exam,
    })
}

fn map_student(
    student_id: i64,
    row: StudentRow,
    program: Program,
) -> Result<Student, DatabaseError> {
    let enrolled_on = NaiveDate::parse_from_str(&row.enrolled_on, DATE_FORMAT).map_err(|_| {
        DatabaseError::Mapping(format!("invalid enrollment date '{}'", row.enrolled_on))
    })?;

    let records = row
        .records
        .into_iter()
        .map(|record| map_record(record, &program))
        .collect::<Result<Vec<_>, DatabaseError>>()?;

    let goals =
        row.goals.into_iter().map(map_goal).collect::<Result<Vec<_>, DatabaseError>>()?;

    Ok(Student {
        id: student_id,
        name: row.name,
        matriculation: into_u32(row.matriculation, "matriculation")?,
        enrolled_on,
        program,
        records,
        goals,
    })
}

fn map_record(row: RecordRow, program: &Program) -> Result<CourseRecord, DatabaseError> {
    let module = program
        .modules
        .iter()
        .find(|module| module.id == row.module_id)
        .cloned()
        .ok_or_else(|| {
            DatabaseError::Mapping(format!(
                "record {} references module {} outside the curriculum",
                row.id, row.module_id
            ))
        })?;

    let status = RecordStatus::from_str(&row.status)
        .map_err(|_| DatabaseError::Mapping(format!("unknown record status '{}'", row.status)))?;

    Ok(CourseRecord { id: row.id, module, grade: row.grade, status })
}

fn map_goal(row: GoalRow) -> Result<StudyGoal, DatabaseError> {
    match row.kind.as_str() {
        GRADE_GOAL_KIND => {
            let target_average = row.target_average.ok_or_else(|| {
                DatabaseError::Mapping(format!("grade goal {} is missing its target", row.id))
            })?;
            Ok(StudyGoal::Grade { id: row.id, target_average })
        }
        DURATION_GOAL_KIND => {
            let target_years = row.target_years.ok_or_else(|| {
                DatabaseError::Mapping(format!("duration goal {} is missing its target", row.id))
            })?;
            Ok(StudyGoal::Duration { id: row.id, target_years: into_u32(target_years, "target_years")? })
        }
        other => Err(DatabaseError::Mapping(format!("unknown goal kind '{other}'"))),
    }
}

fn student_to_row(student: &Student) -> StudentRow {
    StudentRow {
        name: student.name.clone(),
        matriculation: i64::from(student.matriculation),
        enrolled_on: student.enrolled_on.format(DATE_FORMAT).to_string(),
        program_id: student.program.id,
        records: student
            .records
            .iter()
            .map(|record| RecordRow {
                id: record.id,
                module_id: record.module.id,
                grade: record.grade,
                status: record.status.to_string(),
            })
            .collect(),
        goals: student
            .goals
            .iter()
            .map(|goal| match *goal {
                StudyGoal::Grade { id, target_average } => GoalRow {
                    id,
                    kind: GRADE_GOAL_KIND.to_owned(),
                    target_average: Some(target_average),
                    target_years: None,
                },
                StudyGoal::Duration { id, target_years } => GoalRow {
                    id,
                    kind: DURATION_GOAL_KIND.to_owned(),
                    target_average: None,
                    target_years: Some(i64::from(target_years)),
                },
            })
            .collect(),
    }
}

fn into_u32(value: i64, field: &str) -> Result<u32, DatabaseError> {
    u32::try_from(value)
        .map_err(|_| DatabaseError::Mapping(format!("{field} {value} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Program {
        map_program(
            1,
            ProgramRow {
                title: "Computer Science".to_owned(),
                total_ects: 180,
                degree: "bsc".to_owned(),
                modules: vec![ModuleRow {
                    id: 10,
                    title: "Mathematics 1".to_owned(),
                    ects: 8,
                    semester: 1,
                    exam: "written".to_owned(),
                }],
            },
        )
        .unwrap()
    }

    #[test]
    fn maps_program_and_modules() {
        let program = program();

        assert_eq!(program.degree, Degree::Bsc);
        assert_eq!(program.modules.len(), 1);
        assert_eq!(program.modules[0].exam, ExamFormat::Written);
        assert_eq!(program.modules[0].ects, 8);
    }

    #[test]
    fn rejects_unknown_degree() {
        let result = map_program(
            1,
            ProgramRow {
                title: "X".to_owned(),
                total_ects: 180,
                degree: "diploma".to_owned(),
                modules: Vec::new(),
            },
        );

        assert!(matches!(result, Err(DatabaseError::Mapping(_))));
    }

    #[test]
    fn maps_student_with_records_and_goals() {
        let row = StudentRow {
            name: "Max Mustermann".to_owned(),
            matriculation: 123_456,
            enrolled_on: "2024-10-01".to_owned(),
            program_id: 1,
            records: vec![RecordRow {
                id: 1,
                module_id: 10,
                grade: Some(1.7),
                status: "passed".to_owned(),
            }],
            goals: vec![
                GoalRow {
                    id: 1,
                    kind: "grade".to_owned(),
                    target_average: Some(2.0),
                    target_years: None,
                },
                GoalRow {
                    id: 2,
                    kind: "duration".to_owned(),
                    target_average: None,
                    target_years: Some(3),
                },
            ],
        };

        let student = map_student(1, row, program()).unwrap();

        assert_eq!(student.enrolled_on, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(student.records[0].module.title, "Mathematics 1");
        assert_eq!(student.records[0].status, RecordStatus::Passed);
        assert_eq!(student.goals[0], StudyGoal::Grade { id: 1, target_average: 2.0 });
        assert_eq!(student.goals[1], StudyGoal::Duration { id: 2, target_years: 3 });
    }

    #[test]
    fn rejects_record_outside_the_curriculum() {
        let row = RecordRow { id: 7, module_id: 99, grade: None, status: "enrolled".to_owned() };

        assert!(matches!(map_record(row, &program()), Err(DatabaseError::Mapping(_))));
    }

    #[test]
    fn rejects_unknown_goal_kind() {
        let row =
            GoalRow { id: 3, kind: "attendance".to_owned(), target_average: None, target_years: None };

        assert!(matches!(map_goal(row), Err(DatabaseError::Mapping(_))));
    }

    #[test]
    fn row_round_trips_through_the_domain() {
        let program = program();
        let student = Student {
            id: 1,
            name: "Max Mustermann".to_owned(),
            matriculation: 123_456,
            enrolled_on: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            program: program.clone(),
            records: vec![CourseRecord {
                id: 1,
                module: program.modules[0].clone(),
                grade: Some(1.7),
                status: RecordStatus::Passed,
            }],
            goals: vec![StudyGoal::Grade { id: 1, target_average: 2.0 }],
        };

        let row = student_to_row(&student);
        let mapped = map_student(1, row, program).unwrap();

        assert_eq!(mapped, student);
    }
}
