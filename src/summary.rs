//! The aggregation core: pure functions turning stored trips into the
//! per-employee and global numbers the dashboard and the JSON API render.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    models::{employee::EmployeeSummary, trip::Trip},
    policy::TravelPolicy,
};

/// Sum of each trip's day count. Malformed entries were already coerced to 0
/// at the deserialization boundary, so this is a plain sum.
pub fn total_days(trips: &[Trip]) -> i64 {
    trips.iter().map(|trip| trip.days).sum()
}

pub fn summarize_employee(
    name: impl Into<String>,
    trips: Vec<Trip>,
    policy: &TravelPolicy,
) -> EmployeeSummary {
    let total = total_days(&trips);
    // The first trip carrying an email wins, matching how the cards render it.
    let email = trips.iter().find_map(|trip| trip.email.clone());
    EmployeeSummary {
        name: name.into(),
        email,
        trips,
        total_days: total,
        days_remaining: policy.days_remaining(total),
    }
}

/// Heaviest travelers first, ties broken by name for a stable order.
pub fn summarize_all(
    trips_by_employee: BTreeMap<String, Vec<Trip>>,
    policy: &TravelPolicy,
) -> Vec<EmployeeSummary> {
    let mut employees: Vec<_> = trips_by_employee
        .into_iter()
        .map(|(name, trips)| summarize_employee(name, trips, policy))
        .collect();
    employees.sort_by(|a, b| {
        b.total_days
            .cmp(&a.total_days)
            .then_with(|| a.name.cmp(&b.name))
    });
    employees
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalSummary {
    pub total_days: i64,
    pub days_remaining: i64,
    pub days_since_policy_start: i64,
}

pub fn global_summary(
    employees: &[EmployeeSummary],
    policy: &TravelPolicy,
    today: NaiveDate,
) -> GlobalSummary {
    let total: i64 = employees.iter().map(|emp| emp.total_days).sum();
    GlobalSummary {
        total_days: total,
        days_remaining: policy.days_remaining(total),
        days_since_policy_start: policy.days_since_start(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn policy() -> TravelPolicy {
        TravelPolicy::default()
    }

    fn trips_from(value: serde_json::Value) -> Vec<Trip> {
        serde_json::from_value(value).expect("trips deserialize")
    }

    #[test]
    fn sums_days_and_coerces_malformed_entries_to_zero() {
        let trips = trips_from(json!([{ "days": 10 }, { "days": 5 }, { "days": "x" }]));
        assert_eq!(total_days(&trips), 15);

        let emp = summarize_employee("Alice", trips, &policy());
        assert_eq!(emp.total_days, 15);
        assert_eq!(emp.days_remaining, 235);
    }

    #[test]
    fn missing_days_count_as_zero() {
        let trips = trips_from(json!([{ "route": "ATH-SIN-ATH" }]));
        assert_eq!(total_days(&trips), 0);
    }

    #[test]
    fn numeric_strings_still_count() {
        let trips = trips_from(json!([{ "days": "10" }, { "days": 5 }]));
        assert_eq!(total_days(&trips), 15);
    }

    #[test]
    fn empty_trip_list_keeps_the_full_limit() {
        let emp = summarize_employee("Bob", Vec::new(), &policy());
        assert_eq!(emp.total_days, 0);
        assert_eq!(emp.days_remaining, 250);
        assert_eq!(policy().usage_percent(emp.total_days), 0.0);
    }

    #[test]
    fn over_limit_goes_negative_but_the_bar_is_capped() {
        let trips = trips_from(json!([{ "days": 300 }]));
        let emp = summarize_employee("Carol", trips, &policy());
        assert_eq!(emp.days_remaining, -50);

        let policy = policy();
        assert!((policy.usage_percent(emp.total_days) - 120.0).abs() < 1e-9);
        assert_eq!(policy.bar_width(emp.total_days), 100);
        assert!(policy.is_near_limit(emp.total_days));
    }

    #[test]
    fn employees_are_sorted_by_days_used() {
        let mut grouped = BTreeMap::new();
        grouped.insert(
            "Alice".to_string(),
            trips_from(json!([{ "days": 5 }])),
        );
        grouped.insert(
            "Bob".to_string(),
            trips_from(json!([{ "days": 20 }])),
        );
        let employees = summarize_all(grouped, &policy());
        assert_eq!(employees[0].name, "Bob");
        assert_eq!(employees[1].name, "Alice");
    }

    #[test]
    fn first_trip_email_wins() {
        let trips = trips_from(json!([
            { "days": 1 },
            { "days": 2, "email": "second@arrowship.example" },
            { "days": 3, "email": "third@arrowship.example" }
        ]));
        let emp = summarize_employee("Dora", trips, &policy());
        assert_eq!(emp.email.as_deref(), Some("second@arrowship.example"));
    }

    #[test]
    fn global_summary_tracks_totals_and_policy_elapsed_days() {
        let policy = policy();
        let employees = vec![
            summarize_employee("Alice", trips_from(json!([{ "days": 15 }])), &policy),
            summarize_employee("Bob", trips_from(json!([{ "days": 7 }])), &policy),
        ];
        let today = policy.start_date + Duration::days(30);
        let global = global_summary(&employees, &policy, today);
        assert_eq!(global.total_days, 22);
        assert_eq!(global.days_remaining, 228);
        assert_eq!(global.days_since_policy_start, 30);
    }
}
