use crate::error::{AppError, AppResult};
use crate::models::event::EventTask;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use tracing::info;
use uuid::Uuid;

pub fn add_task(
    conn: &Connection,
    event_id: &Uuid,
    title: &str,
    due_date: Option<NaiveDate>,
) -> AppResult<EventTask> {
    conn.execute(
        "INSERT INTO event_tasks (event_id, title, due_date, completed) VALUES (?1, ?2, ?3, 0)",
        rusqlite::params![event_id.to_string(), title, due_date.map(|d| d.to_string())],
    )?;
    let task = EventTask {
        id: conn.last_insert_rowid(),
        event_id: *event_id,
        title: title.to_string(),
        due_date,
        completed: false,
    };
    info!(task_id = task.id, event_id = %event_id, "task added");
    Ok(task)
}

pub fn get_tasks_for_event(conn: &Connection, event_id: &Uuid) -> AppResult<Vec<EventTask>> {
    let mut stmt = conn.prepare(
        "SELECT id, event_id, title, due_date, completed FROM event_tasks
         WHERE event_id = ?1 ORDER BY id ASC",
    )?;
    let iter = stmt.query_map([event_id.to_string()], row_to_task)?;

    let mut tasks = Vec::new();
    for task in iter {
        tasks.push(task?);
    }
    Ok(tasks)
}

pub fn get_task(conn: &Connection, task_id: i64) -> AppResult<EventTask> {
    conn.query_row(
        "SELECT id, event_id, title, due_date, completed FROM event_tasks WHERE id = ?1",
        [task_id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => {
            AppError::NotFound(format!("Task with ID {}", task_id))
        }
        other => AppError::Database(other),
    })
}

pub fn set_task_completed(conn: &Connection, task_id: i64, completed: bool) -> AppResult<()> {
    let rows = conn.execute(
        "UPDATE event_tasks SET completed = ?2 WHERE id = ?1",
        rusqlite::params![task_id, completed],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Task with ID {}", task_id)));
    }
    Ok(())
}

/// Flips the completed flag and returns the new state.
pub fn toggle_task(conn: &Connection, task_id: i64) -> AppResult<bool> {
    let task = get_task(conn, task_id)?;
    let completed = !task.completed;
    set_task_completed(conn, task_id, completed)?;
    info!(task_id, completed, "task toggled");
    Ok(completed)
}

pub fn remove_task(conn: &Connection, task_id: i64) -> AppResult<()> {
    let rows = conn.execute("DELETE FROM event_tasks WHERE id = ?1", [task_id])?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Task with ID {}", task_id)));
    }
    info!(task_id, "task removed");
    Ok(())
}

fn row_to_task(row: &Row) -> rusqlite::Result<EventTask> {
    let event_id_str: String = row.get(1)?;
    let due_str: Option<String> = row.get(3)?;

    let due_date = match due_str {
        Some(s) => Some(
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?,
        ),
        None => None,
    };

    Ok(EventTask {
        id: row.get(0)?,
        event_id: Uuid::parse_str(&event_id_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?,
        title: row.get(2)?,
        due_date,
        completed: row.get(4)?,
    })
}
