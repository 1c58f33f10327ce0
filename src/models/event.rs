use crate::models::event_type::EventType;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: Uuid,
    pub title: String,
    pub event_type: EventType,
    pub date: NaiveDate,
    pub location: String,
    pub description: Option<String>,
    /// 0 when the organiser has not given a number yet.
    pub guest_count: u32,
    /// Whole rupees; 0 when unset.
    pub budget: u64,
    pub is_finished: bool,
    pub created_at: DateTime<Utc>,
}

impl EventRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        event_type: EventType,
        date: NaiveDate,
        location: String,
        description: Option<String>,
        guest_count: u32,
        budget: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            event_type,
            date,
            location,
            description,
            guest_count,
            budget,
            is_finished: false,
            created_at: Utc::now(),
        }
    }
}

/// Checklist entry belonging to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTask {
    pub id: i64,
    pub event_id: Uuid,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

impl EventTask {
    pub fn due_label(&self) -> String {
        match self.due_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "TBD".to_string(),
        }
    }
}
