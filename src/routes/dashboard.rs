use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::{
    auth::CurrentUser, error::AppError, models::trip::Trip, state::AppState, summary,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/trips/new", get(trip_form).post(trip_submit))
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    email: String,
    policy_start: String,
    limit_days: i64,
    days_since_start: i64,
    employee_count: usize,
    total_days: i64,
    days_remaining: i64,
    employees: Vec<EmployeeCard>,
}

#[derive(Clone)]
struct EmployeeCard {
    name: String,
    email: String,
    has_email: bool,
    total_days: i64,
    days_remaining: i64,
    usage_text: String,
    bar_width: u8,
    near_limit: bool,
    trips: Vec<TripRow>,
}

#[derive(Clone)]
struct TripRow {
    route: String,
    dates: String,
    days: i64,
}

async fn dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user = current.require_user()?;
    let policy = state.config.policy;

    let grouped = state.store.trips_by_employee().await?;
    let employees = summary::summarize_all(grouped, &policy);
    let global = summary::global_summary(&employees, &policy, Local::now().date_naive());

    let cards: Vec<EmployeeCard> = employees
        .into_iter()
        .map(|emp| EmployeeCard {
            has_email: emp.email.is_some(),
            email: emp.email.clone().unwrap_or_default(),
            total_days: emp.total_days,
            days_remaining: emp.days_remaining,
            usage_text: format!("{:.1}%", policy.usage_percent(emp.total_days)),
            bar_width: policy.bar_width(emp.total_days),
            near_limit: policy.is_near_limit(emp.total_days),
            trips: emp
                .trips
                .into_iter()
                .map(|trip| TripRow {
                    route: trip.route,
                    dates: trip.dates,
                    days: trip.days,
                })
                .collect(),
            name: emp.name,
        })
        .collect();

    Ok(AskamaTemplateResponse::into_response(DashboardTemplate {
        email: user.email.clone(),
        policy_start: policy.start_date.format("%d/%m/%Y").to_string(),
        limit_days: policy.max_days_per_year,
        days_since_start: global.days_since_policy_start,
        employee_count: cards.len(),
        total_days: global.total_days,
        days_remaining: global.days_remaining,
        employees: cards,
    }))
}

#[derive(Template)]
#[template(path = "trip_new.html")]
struct TripFormTemplate {
    show_error: bool,
    error_message: String,
    employee: String,
    email: String,
    route: String,
}

async fn trip_form(current: CurrentUser) -> Result<impl IntoResponse, AppError> {
    current.require_user()?;
    Ok(AskamaTemplateResponse::into_response(TripFormTemplate {
        show_error: false,
        error_message: String::new(),
        employee: String::new(),
        email: String::new(),
        route: String::new(),
    }))
}

#[derive(Deserialize)]
struct TripForm {
    employee: String,
    email: Option<String>,
    start: String,
    end: String,
    route: String,
}

async fn trip_submit(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<TripForm>,
) -> Result<Response, AppError> {
    current.require_user()?;

    let (employee, trip) = match build_trip(&form) {
        Ok(planned) => planned,
        Err(message) => return Ok(render_trip_error(form, message)),
    };
    state.store.insert(&employee, &trip).await?;

    Ok(Redirect::to("/dashboard").into_response())
}

fn build_trip(form: &TripForm) -> Result<(String, Trip), String> {
    let employee = form.employee.trim();
    if employee.is_empty() {
        return Err("Please enter an employee name.".into());
    }

    let parsed = NaiveDate::parse_from_str(&form.start, "%Y-%m-%d")
        .and_then(|start| NaiveDate::parse_from_str(&form.end, "%Y-%m-%d").map(|end| (start, end)));
    let Ok((start, end)) = parsed else {
        return Err("Please pick valid start and end dates.".into());
    };
    if start > end {
        return Err("Start date cannot be after end date.".into());
    }

    // Inclusive count: a one-day trip starts and ends on the same date.
    let days = (end - start).num_days() + 1;
    let trip = Trip {
        days,
        dates: format!("{} ➡ {}", start.format("%d/%m/%Y"), end.format("%d/%m/%Y")),
        route: form.route.trim().to_string(),
        start: Some(start),
        end: Some(end),
        email: normalize_optional(form.email.clone()),
    };
    Ok((employee.to_string(), trip))
}

fn render_trip_error(form: TripForm, message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        AskamaTemplateResponse::into_response(TripFormTemplate {
            show_error: true,
            error_message: message,
            employee: form.employee,
            email: form.email.unwrap_or_default(),
            route: form.route,
        }),
    )
        .into_response()
}

fn normalize_optional(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(employee: &str, start: &str, end: &str) -> TripForm {
        TripForm {
            employee: employee.into(),
            email: None,
            start: start.into(),
            end: end.into(),
            route: "ATH-SIN-ATH".into(),
        }
    }

    #[test]
    fn rejects_a_blank_employee_name() {
        let err = build_trip(&form("   ", "2025-10-01", "2025-10-05")).unwrap_err();
        assert_eq!(err, "Please enter an employee name.");
    }

    #[test]
    fn rejects_a_start_after_the_end() {
        let err = build_trip(&form("Alice", "2025-10-05", "2025-10-01")).unwrap_err();
        assert_eq!(err, "Start date cannot be after end date.");
    }

    #[test]
    fn rejects_unparseable_dates() {
        let err = build_trip(&form("Alice", "not-a-date", "2025-10-05")).unwrap_err();
        assert_eq!(err, "Please pick valid start and end dates.");
    }

    #[test]
    fn counts_days_inclusively_and_trims_the_name() {
        let (employee, trip) =
            build_trip(&form(" Alice ", "2025-10-01", "2025-10-05")).expect("valid trip");
        assert_eq!(employee, "Alice");
        assert_eq!(trip.days, 5);
        assert_eq!(trip.dates, "01/10/2025 ➡ 05/10/2025");
    }

    #[test]
    fn a_same_day_trip_counts_one_day() {
        let (_, trip) = build_trip(&form("Bob", "2025-10-01", "2025-10-01")).expect("valid trip");
        assert_eq!(trip.days, 1);
    }
}
