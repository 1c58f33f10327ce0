use crate::models::event::{EventRecord, EventTask};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventProgress {
    pub id: Uuid,
    pub title: String,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub active_events: usize,
    pub total_guests: u64,
    pub total_budget: u64,
    pub events: Vec<EventProgress>,
}

pub fn summarize(
    events: &[EventRecord],
    tasks_by_event: &HashMap<Uuid, Vec<EventTask>>,
) -> DashboardSummary {
    let empty = Vec::new();
    DashboardSummary {
        active_events: events.iter().filter(|e| !e.is_finished).count(),
        total_guests: events.iter().map(|e| u64::from(e.guest_count)).sum(),
        total_budget: events.iter().fold(0u64, |acc, e| acc.saturating_add(e.budget)),
        events: events
            .iter()
            .map(|event| EventProgress {
                id: event.id,
                title: event.title.clone(),
                progress: planning_progress(event, tasks_by_event.get(&event.id).unwrap_or(&empty)),
            })
            .collect(),
    }
}

/// Share of completed checklist items, rounded; finished events count as done.
pub fn planning_progress(event: &EventRecord, tasks: &[EventTask]) -> u8 {
    if event.is_finished {
        return 100;
    }
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    ((completed * 200 + tasks.len()) / (tasks.len() * 2)) as u8
}
