pub mod budget;
pub mod event;
pub mod event_type;
