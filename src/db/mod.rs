pub mod connection;
pub mod event_repository;
pub mod task_repository;
