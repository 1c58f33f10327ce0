use crate::error::{AppError, AppResult};
use crate::models::event::EventRecord;
use crate::models::event_type::EventType;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::info;
use uuid::Uuid;

const EVENT_COLUMNS: &str = "id, title, event_type, date, location, description, \
     guest_count, budget, is_finished, created_at";

pub fn add_event(conn: &Connection, event: &EventRecord) -> AppResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO events ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            EVENT_COLUMNS
        ),
        rusqlite::params![
            event.id.to_string(),
            &event.title,
            event.event_type.as_str(),
            event.date.to_string(),
            &event.location,
            &event.description,
            event.guest_count,
            budget_to_sql(event.budget)?,
            event.is_finished,
            event.created_at.to_rfc3339(),
        ],
    )?;
    info!(id = %event.id, title = %event.title, "event added");
    Ok(())
}

pub fn get_event(conn: &Connection, id: &Uuid) -> AppResult<Option<EventRecord>> {
    let event = conn
        .query_row(
            &format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS),
            [id.to_string()],
            row_to_event,
        )
        .optional()?;
    Ok(event)
}

/// Soonest first; same-day events by title.
pub fn get_all_events(conn: &Connection) -> AppResult<Vec<EventRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM events ORDER BY date ASC, title ASC",
        EVENT_COLUMNS
    ))?;
    let iter = stmt.query_map([], row_to_event)?;

    let mut events = Vec::new();
    for event in iter {
        events.push(event?);
    }
    Ok(events)
}

pub fn update_event(conn: &Connection, event: &EventRecord) -> AppResult<()> {
    let rows = conn.execute(
        "UPDATE events SET title = ?2, event_type = ?3, date = ?4, location = ?5, description = ?6,
            guest_count = ?7, budget = ?8, is_finished = ?9
         WHERE id = ?1",
        rusqlite::params![
            event.id.to_string(),
            &event.title,
            event.event_type.as_str(),
            event.date.to_string(),
            &event.location,
            &event.description,
            event.guest_count,
            budget_to_sql(event.budget)?,
            event.is_finished,
        ],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Event with ID {}", event.id)));
    }
    info!(id = %event.id, "event updated");
    Ok(())
}

/// Tasks go with it through the cascading foreign key.
pub fn remove_event(conn: &Connection, id: &Uuid) -> AppResult<()> {
    let rows = conn.execute("DELETE FROM events WHERE id = ?1", [id.to_string()])?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Event with ID {}", id)));
    }
    info!(%id, "event removed");
    Ok(())
}

pub fn set_event_finished(conn: &Connection, id: &Uuid, finished: bool) -> AppResult<()> {
    let rows = conn.execute(
        "UPDATE events SET is_finished = ?2 WHERE id = ?1",
        rusqlite::params![id.to_string(), finished],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Event with ID {}", id)));
    }
    info!(%id, finished, "event status changed");
    Ok(())
}

fn budget_to_sql(budget: u64) -> AppResult<i64> {
    i64::try_from(budget)
        .map_err(|_| AppError::Validation(format!("Budget {} is too large", budget)))
}

fn conversion_error<E>(column: usize, sql_type: Type, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, sql_type, Box::new(err))
}

fn row_to_event(row: &Row) -> rusqlite::Result<EventRecord> {
    let id_str: String = row.get(0)?;
    let event_type_str: String = row.get(2)?;
    let date_str: String = row.get(3)?;
    let budget: i64 = row.get(7)?;
    let created_at_str: String = row.get(9)?;

    Ok(EventRecord {
        id: Uuid::parse_str(&id_str).map_err(|e| conversion_error(0, Type::Text, e))?,
        title: row.get(1)?,
        event_type: EventType::normalize(&event_type_str),
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| conversion_error(3, Type::Text, e))?,
        location: row.get(4)?,
        description: row.get(5)?,
        guest_count: row.get(6)?,
        budget: u64::try_from(budget).map_err(|e| conversion_error(7, Type::Integer, e))?,
        is_finished: row.get(8)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| conversion_error(9, Type::Text, e))?
            .with_timezone(&Utc),
    })
}
