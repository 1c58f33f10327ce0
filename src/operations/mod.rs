pub mod allocation;
pub mod currency;
pub mod dashboard;
pub mod dates;
pub mod event;
pub mod export;
pub mod recommend;
pub mod view;
