use serde::Serialize;

use crate::models::trip::Trip;

/// Derived per-employee view, recomputed on every refresh. The name doubles
/// as the grouping key; there is no identity beyond it.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub trips: Vec<Trip>,
    pub total_days: i64,
    pub days_remaining: i64,
}
