use std::collections::BTreeMap;

use sqlx::{sqlite::SqliteRow, Row};

use crate::{db::DbPool, error::AppError, models::trip::Trip};

/// SQLite-backed trip storage. Trips are append-only; every view is
/// recomputed from the full table on read.
#[derive(Clone)]
pub struct TripStore {
    db: DbPool,
}

impl TripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn insert(&self, employee: &str, trip: &Trip) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO trips (employee, email, days, dates, start_date, end_date, route) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(employee)
        .bind(&trip.email)
        .bind(trip.days)
        .bind(&trip.dates)
        .bind(trip.start.map(|date| date.to_string()))
        .bind(trip.end.map(|date| date.to_string()))
        .bind(&trip.route)
        .execute(&self.db)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// All trips keyed by employee name, insertion order preserved per employee.
    pub async fn trips_by_employee(&self) -> Result<BTreeMap<String, Vec<Trip>>, AppError> {
        let rows = sqlx::query(
            "SELECT employee, email, days, dates, start_date, end_date, route \
             FROM trips ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        let mut grouped: BTreeMap<String, Vec<Trip>> = BTreeMap::new();
        for row in rows {
            let employee: String = row.get("employee");
            grouped.entry(employee).or_default().push(row_to_trip(&row));
        }
        Ok(grouped)
    }
}

fn row_to_trip(row: &SqliteRow) -> Trip {
    let start: Option<String> = row.get("start_date");
    let end: Option<String> = row.get("end_date");
    Trip {
        days: row.get("days"),
        dates: row.get("dates"),
        route: row.get("route"),
        start: start.and_then(|raw| raw.parse().ok()),
        end: end.and_then(|raw| raw.parse().ok()),
        email: row.get("email"),
    }
}
