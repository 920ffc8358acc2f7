use sdash_database::{Database, DatabaseError, SurrealStudentRepository, seed};
use sdash_domain::repository::StudentRepository;
use sdash_domain::RecordStatus;

async fn test_db() -> Database {
    Database::builder()
        .url("mem://")
        .session("sdash-test", "core")
        .init()
        .await
        .expect("in-memory database should initialize")
}

#[tokio::test]
async fn builder_requires_a_url() {
    let result = Database::builder().session("sdash-test", "core").init().await;

    assert!(matches!(result, Err(DatabaseError::Validation(_))));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = test_db().await;

    // Rerunning the builder pipeline against the same engine is not possible
    // with mem://, but the ledger must report the bootstrap migration.
    let mut response = db.query("SELECT VALUE version FROM migration").await.unwrap();
    let versions = response.take::<Vec<String>>(0).unwrap();

    assert_eq!(versions, vec!["0001_schema".to_owned()]);
}

#[tokio::test]
async fn seed_populates_the_demo_student() {
    let db = test_db().await;

    assert!(seed::run(&db).await.unwrap());

    let repo = SurrealStudentRepository::new(db);
    let student = repo.find_by_id(1).await.unwrap().expect("demo student should exist");

    assert_eq!(student.name, "Max Mustermann");
    assert_eq!(student.matriculation, 123_456);
    assert_eq!(student.program.title, "Computer Science");
    assert_eq!(student.program.modules.len(), 6);
    assert_eq!(student.records.len(), 6);
    assert_eq!(student.goals.len(), 2);
    assert_eq!(student.earned_ects(), 32);
}

#[tokio::test]
async fn seed_is_idempotent() {
    let db = test_db().await;

    assert!(seed::run(&db).await.unwrap());
    assert!(!seed::run(&db).await.unwrap());
}

#[tokio::test]
async fn stored_matriculation_is_numeric() {
    let db = test_db().await;
    seed::run(&db).await.unwrap();

    // The schema types this field as a number; a raw read must yield one.
    let mut response =
        db.query("SELECT VALUE matriculation FROM ONLY type::record('student', 1)").await.unwrap();

    assert_eq!(response.take::<Option<i64>>(0).unwrap(), Some(123_456));
}

#[tokio::test]
async fn unknown_student_maps_to_none() {
    let db = test_db().await;

    let repo = SurrealStudentRepository::new(db);
    assert!(repo.find_by_id(404).await.unwrap().is_none());
}

#[tokio::test]
async fn saved_changes_survive_a_reload() {
    let db = test_db().await;
    seed::run(&db).await.unwrap();

    let repo = SurrealStudentRepository::new(db);
    let mut student = repo.find_by_id(1).await.unwrap().unwrap();

    student.record_grade(3, 1.0).unwrap();
    repo.save(&student).await.unwrap();

    let reloaded = repo.find_by_id(1).await.unwrap().unwrap();
    let record = reloaded.records.iter().find(|r| r.id == 3).unwrap();

    assert_eq!(record.status, RecordStatus::Passed);
    assert_eq!(record.grade, Some(1.0));
    assert_eq!(reloaded.earned_ects(), 40);
}
