use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    error::AppError,
    models::{employee::EmployeeSummary, trip::Trip},
    state::AppState,
    summary,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary_json))
        .route("/employees", get(employees_json))
        .route("/add-trip", post(add_trip))
}

#[derive(Serialize)]
struct SummaryResponse {
    total_days: i64,
    days_remaining: i64,
    days_since_policy_start: i64,
    trips_by_employee: BTreeMap<String, Vec<Trip>>,
}

async fn summary_json(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let policy = state.config.policy;
    let grouped = state.store.trips_by_employee().await?;
    let total: i64 = grouped.values().map(|trips| summary::total_days(trips)).sum();
    Ok(Json(SummaryResponse {
        total_days: total,
        days_remaining: policy.days_remaining(total),
        days_since_policy_start: policy.days_since_start(Local::now().date_naive()),
        trips_by_employee: grouped,
    }))
}

async fn employees_json(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeSummary>>, AppError> {
    let grouped = state.store.trips_by_employee().await?;
    let employees = summary::summarize_all(grouped, &state.config.policy);
    Ok(Json(employees))
}

#[derive(Deserialize)]
struct AddTripRequest {
    employee: String,
    trip: Trip,
}

async fn add_trip(
    State(state): State<AppState>,
    Json(request): Json<AddTripRequest>,
) -> Result<Json<Value>, AppError> {
    let employee = validated_employee(&request.employee)?;

    let id = state.store.insert(&employee, &request.trip).await?;
    debug!("stored trip {id} for {employee}");
    Ok(Json(json!({ "status": "success" })))
}

fn validated_employee(raw: &str) -> Result<String, AppError> {
    let employee = raw.trim();
    if employee.is_empty() {
        return Err(AppError::BadRequest("employee name is required".into()));
    }
    Ok(employee.to_string())
}
