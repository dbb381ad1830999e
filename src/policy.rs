use chrono::NaiveDate;

/// Annual travel policy every employee is measured against.
///
/// Read-only for the lifetime of the process; the limits come from
/// configuration and never change between requests.
#[derive(Debug, Clone, Copy)]
pub struct TravelPolicy {
    pub max_days_per_year: i64,
    pub start_date: NaiveDate,
    /// Employees at or above this many days get flagged on the dashboard.
    pub near_limit_days: i64,
}

impl Default for TravelPolicy {
    fn default() -> Self {
        Self {
            max_days_per_year: 250,
            start_date: NaiveDate::from_ymd_opt(2025, 9, 30).expect("valid policy start date"),
            near_limit_days: 200,
        }
    }
}

impl TravelPolicy {
    /// May be negative once an employee is over the limit; callers render it as-is.
    pub fn days_remaining(&self, total_days: i64) -> i64 {
        self.max_days_per_year - total_days
    }

    /// Unclamped share of the annual limit, e.g. 120.0 for 300 of 250 days.
    pub fn usage_percent(&self, total_days: i64) -> f64 {
        total_days as f64 / self.max_days_per_year as f64 * 100.0
    }

    /// Progress-bar width for rendering only, clamped to 0..=100.
    pub fn bar_width(&self, total_days: i64) -> u8 {
        self.usage_percent(total_days).clamp(0.0, 100.0).round() as u8
    }

    pub fn is_near_limit(&self, total_days: i64) -> bool {
        total_days >= self.near_limit_days
    }

    pub fn days_since_start(&self, today: NaiveDate) -> i64 {
        (today - self.start_date).num_days()
    }
}
