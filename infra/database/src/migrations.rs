use crate::error::DatabaseError;
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Bootstrap schema: the migration ledger itself plus the core tables.
const CORE_SCHEMA: &str = r"
    DEFINE TABLE IF NOT EXISTS migration SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS slice_key ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS version ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS checksum ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS applied_at ON migration TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS migration_unique ON migration FIELDS slice_key, version UNIQUE;

    DEFINE TABLE IF NOT EXISTS program SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS title ON program TYPE string;
    DEFINE FIELD IF NOT EXISTS total_ects ON program TYPE number;
    DEFINE FIELD IF NOT EXISTS degree ON program TYPE string;
    DEFINE FIELD IF NOT EXISTS modules ON program TYPE array DEFAULT [];

    DEFINE TABLE IF NOT EXISTS student SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS name ON student TYPE string;
    DEFINE FIELD IF NOT EXISTS matriculation ON student TYPE number;
    DEFINE FIELD IF NOT EXISTS enrolled_on ON student TYPE string;
    DEFINE FIELD IF NOT EXISTS program_id ON student TYPE number;
    DEFINE FIELD IF NOT EXISTS records ON student TYPE array DEFAULT [];
    DEFINE FIELD IF NOT EXISTS goals ON student TYPE array DEFAULT [];
";

#[derive(Debug)]
pub(crate) struct Migration {
    pub slice_key: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub(crate) const fn new(
        slice_key: &'static str,
        version: &'static str,
        script: &'static str,
    ) -> Self {
        Self { slice_key, version, script }
    }

    /// Hex-encoded SHA-256 digest of the migration script.
    fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.script.as_bytes()))
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration {
            slice_key: self.slice_key.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum(),
        }
    }
}

fn builtin_migrations() -> Vec<Migration> {
    vec![Migration::new("core", "0001_schema", CORE_SCHEMA)]
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub slice_key: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    /// Applies every pending migration, in declaration order.
    ///
    /// Already-applied migrations are verified against the ledger checksum and
    /// skipped; a diverging checksum aborts the run.
    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied_migrations = self.get_migrations_map().await?;

        for migration in builtin_migrations() {
            if let Some(applied) =
                applied_migrations.get(&format!("{}:{}", migration.slice_key, migration.version))
            {
                ensure_checksum_match(&migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(&migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{
                slice_key: $slice,
                version: $version,
                checksum: $checksum,
            }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("slice", migration.slice_key))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await?
            .check()
            .map_err(|e| {
                DatabaseError::Migration(format!(
                    "SQL execution failed at {}:{}: {e}",
                    migration.slice_key, migration.version
                ))
            })?;

        Ok(())
    }

    /// The ledger table only exists after the bootstrap migration ran once.
    async fn is_ledger_ready(&self) -> Result<bool, DatabaseError> {
        let mut response = self
            .db
            .query("!(SELECT VALUE fields FROM ONLY INFO FOR TABLE migration).is_empty()")
            .await?;

        let is_ready = response.take::<Option<bool>>(0)?.unwrap_or_default();
        Ok(is_ready)
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        if !self.is_ledger_ready().await? {
            return Ok(FxHashMap::default());
        }

        let entries = self
            .db
            .query("SELECT slice_key, version, checksum FROM migration")
            .await?
            .take::<Vec<AppliedMigration>>(0)
            .map_err(|e| DatabaseError::Migration(format!("Parsing migrations ledger: {e}")))?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.slice_key, entry.version), entry))
            .collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let expected = migration.checksum();
    if existing != expected {
        return Err(DatabaseError::Migration(format!(
            "Checksum mismatch for {}:{} (ledger {existing}, script {expected})",
            migration.slice_key, migration.version
        )));
    }
    Ok(())
}
