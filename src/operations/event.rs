use crate::config::{effective_guest_count, DEFAULT_LOCATION};
use crate::db::{event_repository, task_repository};
use crate::error::{AppError, AppResult};
use crate::models::budget::{BudgetAllocation, TaskBudget};
use crate::models::event::{EventRecord, EventTask};
use crate::models::event_type::EventType;
use crate::operations::allocation::{allocate, budget_for_task};
use crate::operations::currency::parse_budget;
use crate::operations::dates::parse_natural_date;
use crate::operations::recommend::starter_tasks;
use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

const MAX_TITLE_LEN: usize = 100;

/// Raw event fields as typed on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct EventInput {
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub guest_count: Option<u32>,
    pub budget: Option<String>,
}

/// Stores a new event and seeds its checklist with the starter tasks.
/// A blank title becomes `New Event <n>`, numbered after the stored events.
pub fn create_event_db(
    conn: &Connection,
    input: &EventInput,
    today: NaiveDate,
) -> AppResult<EventRecord> {
    let title = match input.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => validate_title(title)?,
        _ => {
            let existing = event_repository::get_all_events(conn)?.len();
            format!("New Event {}", existing + 1)
        }
    };
    let event_type = match input.event_type.as_deref() {
        Some(t) if !t.trim().is_empty() => EventType::normalize(t.trim()),
        _ => EventType::infer_from_title(&title),
    };
    let date = match input.date.as_deref() {
        Some(text) => parse_date(text, today)?,
        None => today,
    };
    let location = input
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LOCATION)
        .to_string();

    let event = EventRecord::new(
        title,
        event_type,
        date,
        location,
        clean_description(input.description.as_deref()),
        input.guest_count.unwrap_or(0),
        input.budget.as_deref().map(parse_budget).unwrap_or(0),
    );
    event_repository::add_event(conn, &event)?;
    for task in starter_tasks(&event) {
        task_repository::add_task(conn, &event.id, task, None)?;
    }
    Ok(event)
}

/// Applies only the fields present in `input`.
pub fn update_event_db(
    conn: &Connection,
    id_input: &str,
    input: &EventInput,
    today: NaiveDate,
) -> AppResult<EventRecord> {
    let mut event = find_event(conn, id_input)?;

    if let Some(title) = input.title.as_deref() {
        event.title = validate_title(title)?;
    }
    if let Some(event_type) = input.event_type.as_deref() {
        event.event_type = EventType::normalize(event_type.trim());
    }
    if let Some(date) = input.date.as_deref() {
        event.date = parse_date(date, today)?;
    }
    if let Some(location) = input.location.as_deref() {
        let location = location.trim();
        event.location = if location.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            location.to_string()
        };
    }
    if input.description.is_some() {
        event.description = clean_description(input.description.as_deref());
    }
    if let Some(guest_count) = input.guest_count {
        event.guest_count = guest_count;
    }
    if let Some(budget) = input.budget.as_deref() {
        event.budget = parse_budget(budget);
    }

    event_repository::update_event(conn, &event)?;
    Ok(event)
}

pub fn find_event(conn: &Connection, id_input: &str) -> AppResult<EventRecord> {
    let id = parse_id(id_input)?;
    event_repository::get_event(conn, &id)?
        .ok_or_else(|| AppError::NotFound(format!("Event with ID {}", id)))
}

pub fn remove_event_db(conn: &Connection, id_input: &str) -> AppResult<()> {
    let id = parse_id(id_input)?;
    event_repository::remove_event(conn, &id)
}

pub fn set_finished_db(conn: &Connection, id_input: &str, finished: bool) -> AppResult<()> {
    let id = parse_id(id_input)?;
    event_repository::set_event_finished(conn, &id, finished)
}

pub fn add_task_db(
    conn: &Connection,
    event_id_input: &str,
    title: &str,
    due: Option<&str>,
    today: NaiveDate,
) -> AppResult<EventTask> {
    let event = find_event(conn, event_id_input)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Task title cannot be empty".to_string()));
    }
    let due_date = due.map(|d| parse_date(d, today)).transpose()?;
    task_repository::add_task(conn, &event.id, title, due_date)
}

/// Allocation for an event, using the default guest count when none was given.
pub fn event_allocations(event: &EventRecord) -> Vec<BudgetAllocation> {
    allocate(event.event_type, event.budget, effective_guest_count(event.guest_count))
}

/// Budget hint for a checklist task. Events without a budget get none.
pub fn task_budget_hint(event: &EventRecord, task_title: &str) -> Option<TaskBudget> {
    if event.budget == 0 {
        return None;
    }
    Some(budget_for_task(
        task_title,
        event.event_type.as_str(),
        event.budget,
        effective_guest_count(event.guest_count),
    ))
}

fn parse_id(input: &str) -> AppResult<Uuid> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::Validation("Event ID cannot be empty".to_string()));
    }
    Uuid::parse_str(input).map_err(|_| {
        AppError::Validation(format!("Invalid event ID '{}'. Please provide a valid UUID.", input))
    })
}

fn validate_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation("Title too long".to_string()));
    }
    Ok(title.to_string())
}

fn parse_date(text: &str, today: NaiveDate) -> AppResult<NaiveDate> {
    parse_natural_date(text, today).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD, today, tomorrow or yesterday.",
            text.trim()
        ))
    })
}

fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 9).expect("Invalid date")
    }

    fn wedding_input() -> EventInput {
        EventInput {
            title: Some("Priya's Wedding".to_string()),
            date: Some("2026-02-14".to_string()),
            guest_count: Some(150),
            budget: Some("₹5,00,000".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_event_success() {
        let conn = establish_test_connection().unwrap();
        let event = create_event_db(&conn, &wedding_input(), today()).unwrap();

        assert_eq!(event.title, "Priya's Wedding");
        assert_eq!(event.event_type, EventType::Wedding);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        assert_eq!(event.budget, 500000);
        assert_eq!(event.guest_count, 150);
        assert_eq!(event.location, DEFAULT_LOCATION);
        assert!(event.description.is_none());

        let stored = event_repository::get_all_events(&conn).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, event.id);
    }

    #[test]
    fn test_create_event_defaults() {
        let conn = establish_test_connection().unwrap();
        let input = EventInput {
            title: Some("Product Launch".to_string()),
            description: Some("   ".to_string()),
            ..Default::default()
        };
        let event = create_event_db(&conn, &input, today()).unwrap();

        assert_eq!(event.date, today());
        assert_eq!(event.event_type, EventType::Other);
        assert_eq!(event.guest_count, 0);
        assert_eq!(event.budget, 0);
        assert!(event.description.is_none());
    }

    #[test]
    fn test_explicit_type_wins_over_title() {
        let conn = establish_test_connection().unwrap();
        let input = EventInput {
            title: Some("Wedding expo".to_string()),
            event_type: Some("Corporate".to_string()),
            ..Default::default()
        };
        let event = create_event_db(&conn, &input, today()).unwrap();
        assert_eq!(event.event_type, EventType::Corporate);
    }

    #[test]
    fn test_relative_date_accepted() {
        let conn = establish_test_connection().unwrap();
        let input = EventInput {
            title: Some("Team lunch".to_string()),
            date: Some("tomorrow".to_string()),
            ..Default::default()
        };
        let event = create_event_db(&conn, &input, today()).unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());
    }

    #[test]
    fn test_blank_title_gets_numbered_default() {
        let conn = establish_test_connection().unwrap();
        let input = EventInput {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        let first = create_event_db(&conn, &input, today()).unwrap();
        assert_eq!(first.title, "New Event 1");

        let second = create_event_db(&conn, &EventInput::default(), today()).unwrap();
        assert_eq!(second.title, "New Event 2");
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let conn = establish_test_connection().unwrap();
        let event = create_event_db(&conn, &wedding_input(), today()).unwrap();
        let update = EventInput {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        let err = update_event_db(&conn, &event.id.to_string(), &update, today()).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Title cannot be empty");
    }

    #[test]
    fn test_new_event_gets_starter_checklist() {
        let conn = establish_test_connection().unwrap();
        let input = EventInput {
            title: Some("Company Holiday Party".to_string()),
            ..Default::default()
        };
        let event = create_event_db(&conn, &input, today()).unwrap();

        let tasks = task_repository::get_tasks_for_event(&conn, &event.id).unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Confirm catering order",
                "Send invitations",
                "Book photographer",
                "Select decorations",
                "Arrange transportation",
            ]
        );
        assert!(tasks.iter().all(|t| !t.completed && t.due_date.is_none()));
        assert_eq!(tasks[0].due_label(), "TBD");
    }

    #[test]
    fn test_starter_tasks_get_budget_hints() {
        let conn = establish_test_connection().unwrap();
        let mut input = wedding_input();
        input.guest_count = Some(75);
        let event = create_event_db(&conn, &input, today()).unwrap();

        let tasks = task_repository::get_tasks_for_event(&conn, &event.id).unwrap();
        assert_eq!(tasks[0].title, "Book wedding venue");
        let hint = task_budget_hint(&event, &tasks[0].title).unwrap();
        assert_eq!(hint.category, "Venue & Catering");
        assert_eq!(hint.amount, 75000);
    }

    #[test]
    fn test_create_event_title_too_long() {
        let conn = establish_test_connection().unwrap();
        let input = EventInput {
            title: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(create_event_db(&conn, &input, today()).is_err());
    }

    #[test]
    fn test_create_event_invalid_date() {
        let conn = establish_test_connection().unwrap();
        let input = EventInput {
            date: Some("15/12/2025".to_string()),
            ..wedding_input()
        };
        let err = create_event_db(&conn, &input, today()).unwrap_err();
        assert!(err.to_string().contains("Invalid date '15/12/2025'"));
        assert!(event_repository::get_all_events(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_update_event_only_given_fields() {
        let conn = establish_test_connection().unwrap();
        let event = create_event_db(&conn, &wedding_input(), today()).unwrap();

        let update = EventInput {
            guest_count: Some(220),
            location: Some("Lakeside Lawn".to_string()),
            ..Default::default()
        };
        let updated = update_event_db(&conn, &event.id.to_string(), &update, today()).unwrap();

        assert_eq!(updated.title, "Priya's Wedding");
        assert_eq!(updated.budget, 500000);
        assert_eq!(updated.guest_count, 220);
        assert_eq!(updated.location, "Lakeside Lawn");
        assert_eq!(find_event(&conn, &event.id.to_string()).unwrap(), updated);
    }

    #[test]
    fn test_invalid_id_rejected() {
        let conn = establish_test_connection().unwrap();
        let err = find_event(&conn, "42").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("valid UUID"));
    }

    #[test]
    fn test_missing_event_not_found() {
        let conn = establish_test_connection().unwrap();
        let err = remove_event_db(&conn, &Uuid::new_v4().to_string()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_add_task_to_event() {
        let conn = establish_test_connection().unwrap();
        let event = create_event_db(&conn, &wedding_input(), today()).unwrap();

        let task = add_task_db(
            &conn,
            &event.id.to_string(),
            " Order flowers ",
            Some("2026-01-15"),
            today(),
        )
        .unwrap();
        assert_eq!(task.title, "Order flowers");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 1, 15));

        let err = add_task_db(&conn, &event.id.to_string(), "", None, today()).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Task title cannot be empty");
    }

    #[test]
    fn test_task_budget_hint_uses_event_budget() {
        let conn = establish_test_connection().unwrap();
        let mut input = wedding_input();
        input.guest_count = Some(75);
        let event = create_event_db(&conn, &input, today()).unwrap();

        let hint = task_budget_hint(&event, "Order flowers").unwrap();
        assert_eq!(hint.category, "Decor & Flowers");
        assert_eq!(hint.amount, 25000);
        assert_eq!(hint.percentage, 15);
    }

    #[test]
    fn test_task_budget_hint_defaults_guest_count() {
        let mut event = EventRecord::new(
            "Wedding".to_string(),
            EventType::Wedding,
            today(),
            DEFAULT_LOCATION.to_string(),
            None,
            0,
            500000,
        );
        // 0 guests reads as 50, which is the small band
        assert_eq!(task_budget_hint(&event, "Book wedding venue").unwrap().amount, 69876);

        event.budget = 0;
        assert!(task_budget_hint(&event, "Book wedding venue").is_none());
    }
}
