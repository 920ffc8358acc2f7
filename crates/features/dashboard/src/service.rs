use crate::error::DashboardError;
use crate::views::{self, DashboardView};
use chrono::{Local, NaiveDate};
use moka::future::Cache;
use sdash_domain::config::DashboardConfig;
use sdash_domain::repository::StudentRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read side of the dashboard: loads a student, assembles the view model,
/// and caches it until a write invalidates the entry.
#[derive(Debug)]
pub struct DashboardService<R> {
    repo: R,
    cache: Cache<i64, Arc<DashboardView>>,
}

impl<R: StudentRepository> DashboardService<R> {
    #[must_use]
    pub fn new(repo: R, config: &DashboardConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();

        Self { repo, cache }
    }

    /// Returns the dashboard view for `student_id`, as of today.
    ///
    /// # Errors
    /// * [`DashboardError::StudentNotFound`] for unknown ids.
    /// * [`DashboardError::Repository`] when the store fails.
    pub async fn get_dashboard(
        &self,
        student_id: i64,
    ) -> Result<Arc<DashboardView>, DashboardError> {
        self.get_dashboard_on(student_id, Local::now().date_naive()).await
    }

    pub(crate) async fn get_dashboard_on(
        &self,
        student_id: i64,
        on: NaiveDate,
    ) -> Result<Arc<DashboardView>, DashboardError> {
        if let Some(view) = self.cache.get(&student_id).await {
            debug!(student_id, "Dashboard cache hit");
            return Ok(view);
        }

        let student = self
            .repo
            .find_by_id(student_id)
            .await?
            .ok_or(DashboardError::StudentNotFound(student_id))?;

        let view = Arc::new(views::assemble(&student, on));
        self.cache.insert(student_id, Arc::clone(&view)).await;

        Ok(view)
    }

    /// Drops the cached view for a student, forcing a reload on the next read.
    pub async fn invalidate(&self, student_id: i64) {
        debug!(student_id, "Invalidating dashboard cache entry");
        self.cache.invalidate(&student_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sdash_domain::repository::RepositoryError;
    use sdash_domain::{Degree, Program, Student};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FakeRepo {
        student: Option<Student>,
        calls: AtomicUsize,
    }

    impl StudentRepository for FakeRepo {
        async fn find_by_id(&self, _student_id: i64) -> Result<Option<Student>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.student.clone())
        }

        async fn save(&self, _student: &Student) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn sample_student() -> Student {
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
                modules: Vec::new(),
            },
            records: Vec::new(),
            goals: Vec::new(),
        }
    }

    fn config() -> DashboardConfig {
        DashboardConfig::default()
    }

    #[tokio::test]
    async fn second_read_is_served_from_the_cache() {
        let repo = FakeRepo { student: Some(sample_student()), calls: AtomicUsize::new(0) };
        let service = DashboardService::new(repo, &config());
        let on = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let first = service.get_dashboard_on(1, on).await.unwrap();
        let second = service.get_dashboard_on(1, on).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.repo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidation_forces_a_reload() {
        let repo = FakeRepo { student: Some(sample_student()), calls: AtomicUsize::new(0) };
        let service = DashboardService::new(repo, &config());
        let on = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        service.get_dashboard_on(1, on).await.unwrap();
        service.invalidate(1).await;
        service.get_dashboard_on(1, on).await.unwrap();

        assert_eq!(service.repo.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let repo = FakeRepo { student: None, calls: AtomicUsize::new(0) };
        let service = DashboardService::new(repo, &config());
        let on = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let result = service.get_dashboard_on(404, on).await;
        assert!(matches!(result, Err(DashboardError::StudentNotFound(404))));
    }
}
