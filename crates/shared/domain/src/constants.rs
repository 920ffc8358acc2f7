//! Shared string and tuning constants.

/// OpenAPI tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// OpenAPI tag for dashboard endpoints.
pub const DASHBOARD_TAG: &str = "Dashboard";
/// OpenAPI tag for course record endpoints.
pub const RECORDS_TAG: &str = "Records";

/// Lowest (best) grade on the German scale.
pub const MIN_GRADE: f64 = 1.0;
/// Highest (worst) grade on the German scale.
pub const MAX_GRADE: f64 = 5.0;
/// Grades up to and including this value count as passed.
pub const PASS_THRESHOLD: f64 = 4.0;

/// Tolerance band above a grade target that still counts as "in progress".
pub const GRADE_GOAL_TOLERANCE: f64 = 0.3;
/// ECTS shortfall (roughly half a semester) tolerated by duration goals.
pub const DURATION_GOAL_BUFFER_ECTS: f64 = 15.0;

/// Average length of a year in days, accounting for leap years.
pub const DAYS_PER_YEAR: f64 = 365.25;
/// A semester spans six calendar months.
pub const MONTHS_PER_SEMESTER: u32 = 6;
